// Wire types for the inventory backend.
//
// Field names on the wire are the backend's Spanish column names; the Rust
// side uses English names and maps them with `#[serde(rename)]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn default_true() -> bool {
    true
}

// ── Product ─────────────────────────────────────────────────────────

/// A stocked inventory item, as returned by `GET /productos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    /// Current quantity on hand.
    #[serde(rename = "stock_actual", default, deserialize_with = "null_as_default")]
    pub stock: f64,
    /// Threshold at or below which the product counts as low stock.
    #[serde(rename = "stock_minimo", default, deserialize_with = "null_as_default")]
    pub min_stock: f64,
    #[serde(rename = "unidad", default)]
    pub unit: Option<String>,
    #[serde(rename = "precio_unitario", default)]
    pub unit_price: Option<f64>,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    /// Missing means active (backend default); `null` reads as inactive.
    #[serde(rename = "activo", default = "default_true", deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    /// Stock at or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// ── Movement ────────────────────────────────────────────────────────

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "entrada")]
    Entry,
    #[serde(rename = "salida")]
    Exit,
}

impl MovementKind {
    /// Wire value (`entrada` / `salida`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entrada",
            Self::Exit => "salida",
        }
    }

    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Entry => Self::Exit,
            Self::Exit => Self::Entry,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known movement kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMovementKind(pub String);

impl fmt::Display for UnknownMovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown movement type '{}'", self.0)
    }
}

impl std::error::Error for UnknownMovementKind {}

impl FromStr for MovementKind {
    type Err = UnknownMovementKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entrada" => Ok(Self::Entry),
            "salida" => Ok(Self::Exit),
            _ => Err(UnknownMovementKind(s.to_owned())),
        }
    }
}

/// A recorded stock change, as returned by `GET /movimientos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: i64,
    /// Not validated client-side; may reference a product that is not loaded.
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    /// ISO-8601 timestamp as sent by the backend (usually without offset).
    #[serde(rename = "fecha", default)]
    pub timestamp: String,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "cantidad", default, deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "usuario", default)]
    pub user: Option<String>,
}

// ── Statistics ──────────────────────────────────────────────────────

/// Aggregate snapshot from `GET /estadisticas`. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "total_productos", default, deserialize_with = "null_as_default")]
    pub total_products: u64,
    #[serde(
        rename = "productos_bajo_stock",
        default,
        deserialize_with = "null_as_default"
    )]
    pub low_stock_products: u64,
    #[serde(
        rename = "valor_total_inventario",
        alias = "valor_total",
        default,
        deserialize_with = "null_as_default"
    )]
    pub total_value: f64,
}

// ── Creation payloads ───────────────────────────────────────────────

/// Body for `POST /productos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewProduct {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "unidad", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "stock_actual", skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,
    #[serde(rename = "stock_minimo", skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<f64>,
    #[serde(rename = "precio_unitario", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(rename = "ubicacion", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /movimientos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMovement {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "usuario", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

// ── Query filters ───────────────────────────────────────────────────

/// Optional filters accepted by `GET /productos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    /// The backend defaults to active products only.
    pub active: Option<bool>,
}

impl ProductQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref category) = self.category {
            params.push(("categoria", category.clone()));
        }
        if let Some(active) = self.active {
            params.push(("activo", active.to_string()));
        }
        params
    }
}

/// Optional filters accepted by `GET /movimientos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementQuery {
    pub product_id: Option<i64>,
    pub kind: Option<MovementKind>,
}

impl MovementQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.product_id {
            params.push(("producto_id", id.to_string()));
        }
        if let Some(kind) = self.kind {
            params.push(("tipo", kind.as_str().to_owned()));
        }
        params
    }
}

// ── Misc responses ──────────────────────────────────────────────────

/// `{"error": "..."}` body returned by the backend on failed writes.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_defaults_optional_fields() {
        let p: Product = serde_json::from_value(json!({
            "id": 7,
            "codigo": "T-001",
            "nombre": "Tinta cian",
            "stock_actual": null,
            "stock_minimo": 2
        }))
        .unwrap();

        assert_eq!(p.stock, 0.0);
        assert!(p.active);
        assert!(p.unit.is_none());
        assert!(p.is_low_stock());
    }

    #[test]
    fn null_active_reads_as_inactive() {
        let p: Product = serde_json::from_value(json!({
            "id": 1, "codigo": "A", "nombre": "B", "activo": null
        }))
        .unwrap();
        assert!(!p.active);
    }

    #[test]
    fn statistics_accepts_both_value_field_names() {
        let a: Statistics =
            serde_json::from_value(json!({ "valor_total_inventario": 12.5 })).unwrap();
        let b: Statistics = serde_json::from_value(json!({ "valor_total": 12.5 })).unwrap();
        assert_eq!(a.total_value, 12.5);
        assert_eq!(a, b);
        assert_eq!(a.total_products, 0);
    }

    #[test]
    fn movement_kind_is_a_closed_set() {
        let err = serde_json::from_value::<MovementKind>(json!("ajuste"));
        assert!(err.is_err());
        assert_eq!("SALIDA".parse::<MovementKind>().unwrap(), MovementKind::Exit);
    }

    #[test]
    fn new_product_omits_absent_fields() {
        let body = serde_json::to_value(NewProduct {
            code: "T-9".into(),
            name: "Tinta negra".into(),
            stock: Some(3.0),
            ..NewProduct::default()
        })
        .unwrap();

        assert_eq!(
            body,
            json!({ "codigo": "T-9", "nombre": "Tinta negra", "stock_actual": 3.0 })
        );
    }
}
