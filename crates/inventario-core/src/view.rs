//! Declarative view layer.
//!
//! Pure functions from store snapshots to render instructions. Each call
//! produces a complete table body that replaces the previous one; the
//! front-end only maps these plain values onto widgets.

use chrono::{DateTime, NaiveDateTime};
use inventario_api::{Movement, MovementKind, Product, Statistics};

pub const PRODUCT_COLUMNS: [&str; 8] = [
    "Código",
    "Nombre",
    "Categoría",
    "Stock",
    "Stock mín.",
    "Precio",
    "Ubicación",
    "Estado",
];

pub const MOVEMENT_COLUMNS: [&str; 6] = [
    "Fecha",
    "Producto",
    "Tipo",
    "Cantidad",
    "Motivo",
    "Usuario",
];

/// Movements beyond this many are not rendered.
pub const MAX_MOVEMENT_ROWS: usize = 50;

pub const NO_PRODUCTS: &str = "No hay productos registrados";
pub const NO_MOVEMENTS: &str = "No hay movimientos registrados";
pub const NO_LOW_STOCK: &str = "No hay productos con stock bajo";

const DEFAULT_UNIT: &str = "uds";
const EMPTY_CELL: &str = "-";

// ── Render instructions ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Low,
    Ok,
}

/// Either a single placeholder row spanning every column, or data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody<R> {
    Placeholder { message: &'static str, colspan: usize },
    Rows(Vec<R>),
}

impl<R> TableBody<R> {
    /// Number of rendered rows, counting a placeholder as one.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Placeholder { .. } => 1,
            Self::Rows(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: String,
    /// Quantity followed by unit, e.g. `4 L`.
    pub stock: String,
    pub stock_level: StockLevel,
    pub min_stock: String,
    pub price: String,
    pub location: String,
    pub status: Badge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRow {
    pub date: String,
    pub product: String,
    pub kind: Badge,
    pub quantity: String,
    pub reason: String,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsView {
    pub total_products: String,
    pub low_stock_products: String,
    pub total_value: String,
}

// ── Views ───────────────────────────────────────────────────────────

pub fn statistics_view(stats: &Statistics) -> StatisticsView {
    StatisticsView {
        total_products: stats.total_products.to_string(),
        low_stock_products: stats.low_stock_products.to_string(),
        total_value: format_money(stats.total_value),
    }
}

pub fn products_view(products: &[Product]) -> TableBody<ProductRow> {
    product_table(products.iter(), NO_PRODUCTS)
}

/// Products at or below their minimum stock.
pub fn low_stock_view(products: &[Product]) -> TableBody<ProductRow> {
    product_table(products.iter().filter(|p| p.is_low_stock()), NO_LOW_STOCK)
}

/// The first [`MAX_MOVEMENT_ROWS`] movements, with product names resolved
/// against `products`.
pub fn movements_view(movements: &[Movement], products: &[Product]) -> TableBody<MovementRow> {
    if movements.is_empty() {
        return TableBody::Placeholder {
            message: NO_MOVEMENTS,
            colspan: MOVEMENT_COLUMNS.len(),
        };
    }

    let rows = movements
        .iter()
        .take(MAX_MOVEMENT_ROWS)
        .map(|m| MovementRow {
            date: format_timestamp(&m.timestamp),
            product: products
                .iter()
                .find(|p| p.id == m.product_id)
                .map_or_else(|| format!("Producto #{}", m.product_id), |p| p.name.clone()),
            kind: movement_badge(m.kind),
            quantity: format_number(m.quantity),
            reason: or_dash(m.reason.as_deref()),
            user: or_dash(m.user.as_deref()),
        })
        .collect();
    TableBody::Rows(rows)
}

fn product_table<'a>(
    products: impl Iterator<Item = &'a Product>,
    empty: &'static str,
) -> TableBody<ProductRow> {
    let rows: Vec<ProductRow> = products.map(product_row).collect();
    if rows.is_empty() {
        TableBody::Placeholder {
            message: empty,
            colspan: PRODUCT_COLUMNS.len(),
        }
    } else {
        TableBody::Rows(rows)
    }
}

fn product_row(p: &Product) -> ProductRow {
    let unit = p
        .unit
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_UNIT);

    ProductRow {
        id: p.id,
        code: p.code.clone(),
        name: p.name.clone(),
        category: or_dash(p.category.as_deref()),
        stock: format!("{} {unit}", format_number(p.stock)),
        stock_level: if p.is_low_stock() {
            StockLevel::Low
        } else {
            StockLevel::Ok
        },
        min_stock: format_number(p.min_stock),
        price: format_money(p.unit_price.unwrap_or_default()),
        location: or_dash(p.location.as_deref()),
        status: if p.active {
            Badge {
                text: "Activo".into(),
                tone: Tone::Success,
            }
        } else {
            Badge {
                text: "Inactivo".into(),
                tone: Tone::Danger,
            }
        },
    }
}

fn movement_badge(kind: MovementKind) -> Badge {
    Badge {
        text: kind.as_str().to_uppercase(),
        tone: match kind {
            MovementKind::Entry => Tone::Success,
            MovementKind::Exit => Tone::Warning,
        },
    }
}

// ── Formatting helpers ──────────────────────────────────────────────

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(EMPTY_CELL)
        .to_owned()
}

/// Euro amount with two decimals: `€12.50`.
pub fn format_money(value: f64) -> String {
    format!("€{value:.2}")
}

/// Shortest decimal form: `5` for 5.0, `2.5` for 2.5.
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Render a backend timestamp as `d/m/yyyy, HH:MM:SS` (Spanish locale).
///
/// Offset-less timestamps are shown as-is; timestamps with an offset are
/// shown in their own wall-clock time. Unparsable input is returned
/// verbatim.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%-d/%-m/%Y, %H:%M:%S";

    let raw = raw.trim();
    if raw.is_empty() {
        return EMPTY_CELL.to_owned();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.naive_local().format(DISPLAY).to_string();
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map_or_else(|| raw.to_owned(), |dt| dt.format(DISPLAY).to_string())
}
