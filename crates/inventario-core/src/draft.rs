// ── Form drafts ──
//
// Raw text typed into the creation modals, converted into API payloads
// on submit. Conversion is where required fields and number syntax are
// checked; the resulting `CoreError::Validation` becomes an error banner.

use inventario_api::{MovementKind, NewMovement, NewProduct};

use crate::error::CoreError;

/// What a form field holds, so the front-end knows how to edit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// Cycled with a toggle key rather than typed.
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        label,
        kind,
        required,
    }
}

// ── Product ─────────────────────────────────────────────────────────

/// Contents of the "Nuevo producto" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub stock: String,
    pub min_stock: String,
    pub unit_price: String,
    pub location: String,
    pub notes: String,
}

impl ProductDraft {
    pub const FIELDS: [FieldSpec; 9] = [
        field("Código", FieldKind::Text, true),
        field("Nombre", FieldKind::Text, true),
        field("Categoría", FieldKind::Text, false),
        field("Unidad", FieldKind::Text, false),
        field("Stock actual", FieldKind::Number, false),
        field("Stock mínimo", FieldKind::Number, false),
        field("Precio unitario", FieldKind::Number, false),
        field("Ubicación", FieldKind::Text, false),
        field("Observaciones", FieldKind::Text, false),
    ];

    pub fn field(&self, idx: usize) -> Option<&str> {
        let value = match idx {
            0 => &self.code,
            1 => &self.name,
            2 => &self.category,
            3 => &self.unit,
            4 => &self.stock,
            5 => &self.min_stock,
            6 => &self.unit_price,
            7 => &self.location,
            8 => &self.notes,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.code),
            1 => Some(&mut self.name),
            2 => Some(&mut self.category),
            3 => Some(&mut self.unit),
            4 => Some(&mut self.stock),
            5 => Some(&mut self.min_stock),
            6 => Some(&mut self.unit_price),
            7 => Some(&mut self.location),
            8 => Some(&mut self.notes),
            _ => None,
        }
    }

    /// Validate and build the `POST /productos` body.
    pub fn to_payload(&self) -> Result<NewProduct, CoreError> {
        Ok(NewProduct {
            code: required(&self.code, "El código es obligatorio")?,
            name: required(&self.name, "El nombre es obligatorio")?,
            category: optional(&self.category),
            unit: optional(&self.unit),
            stock: number(&self.stock, "Stock actual")?,
            min_stock: number(&self.min_stock, "Stock mínimo")?,
            unit_price: number(&self.unit_price, "Precio unitario")?,
            location: optional(&self.location),
            notes: optional(&self.notes),
        })
    }
}

// ── Movement ────────────────────────────────────────────────────────

/// Contents of the "Nuevo movimiento" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    pub product_id: String,
    pub kind: MovementKind,
    pub quantity: String,
    pub reason: String,
    pub user: String,
}

impl Default for MovementDraft {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            kind: MovementKind::Entry,
            quantity: String::new(),
            reason: String::new(),
            user: String::new(),
        }
    }
}

impl MovementDraft {
    pub const FIELDS: [FieldSpec; 5] = [
        field("Producto (ID)", FieldKind::Number, true),
        field("Tipo", FieldKind::Choice, true),
        field("Cantidad", FieldKind::Number, true),
        field("Motivo", FieldKind::Text, false),
        field("Usuario", FieldKind::Text, false),
    ];

    /// A draft with the product already filled in.
    pub fn for_product(product_id: i64) -> Self {
        Self {
            product_id: product_id.to_string(),
            ..Self::default()
        }
    }

    pub fn field(&self, idx: usize) -> Option<&str> {
        match idx {
            0 => Some(&self.product_id),
            1 => Some(self.kind.as_str()),
            2 => Some(&self.quantity),
            3 => Some(&self.reason),
            4 => Some(&self.user),
            _ => None,
        }
    }

    /// Editable text for `idx`; `None` for the choice field.
    pub fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.product_id),
            2 => Some(&mut self.quantity),
            3 => Some(&mut self.reason),
            4 => Some(&mut self.user),
            _ => None,
        }
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
    }

    /// Validate and build the `POST /movimientos` body.
    pub fn to_payload(&self) -> Result<NewMovement, CoreError> {
        let raw_id = required(&self.product_id, "El producto es obligatorio")?;
        let product_id = raw_id
            .parse::<i64>()
            .map_err(|_| CoreError::validation(format!("ID de producto no válido: {raw_id}")))?;

        let quantity = number(&self.quantity, "Cantidad")?
            .ok_or_else(|| CoreError::validation("La cantidad es obligatoria"))?;
        if quantity <= 0.0 {
            return Err(CoreError::validation("La cantidad debe ser mayor que 0."));
        }

        Ok(NewMovement {
            product_id,
            kind: self.kind,
            quantity,
            reason: optional(&self.reason),
            user: optional(&self.user),
        })
    }
}

// ── Field parsing ───────────────────────────────────────────────────

fn required(raw: &str, message: &str) -> Result<String, CoreError> {
    optional(raw).ok_or_else(|| CoreError::validation(message))
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Blank is `None`; a decimal comma is accepted.
fn number(raw: &str, label: &str) -> Result<Option<f64>, CoreError> {
    let Some(text) = optional(raw) else {
        return Ok(None);
    };
    match text.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(CoreError::validation(format!(
            "«{label}» no es un número válido: {text}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product_draft() -> ProductDraft {
        ProductDraft {
            code: " TIN-001 ".into(),
            name: "Tinta cian".into(),
            stock: "4".into(),
            unit_price: "12,50".into(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn product_draft_builds_trimmed_payload() {
        let payload = product_draft().to_payload().unwrap();
        assert_eq!(payload.code, "TIN-001");
        assert_eq!(payload.stock, Some(4.0));
        assert_eq!(payload.unit_price, Some(12.5));
        assert_eq!(payload.category, None);
        assert_eq!(payload.min_stock, None);
    }

    #[test]
    fn product_draft_requires_code_and_name() {
        let mut draft = product_draft();
        draft.name = "   ".into();
        let err = draft.to_payload().unwrap_err();
        assert_eq!(err.to_string(), "El nombre es obligatorio");

        draft.code.clear();
        let err = draft.to_payload().unwrap_err();
        assert_eq!(err.to_string(), "El código es obligatorio");
    }

    #[test]
    fn product_draft_rejects_bad_numbers() {
        let mut draft = product_draft();
        draft.min_stock = "diez".into();
        let err = draft.to_payload().unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(err.to_string().contains("Stock mínimo"));
    }

    #[test]
    fn product_fields_are_addressable_by_index() {
        let mut draft = ProductDraft::default();
        for idx in 0..ProductDraft::FIELDS.len() {
            draft.field_mut(idx).unwrap().push('x');
        }
        assert_eq!(draft.field(8), Some("x"));
        assert!(draft.field(9).is_none());
    }

    #[test]
    fn movement_draft_builds_payload() {
        let mut draft = MovementDraft::for_product(3);
        draft.quantity = "2.5".into();
        draft.toggle_kind();
        draft.reason = "Pedido 42".into();

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.product_id, 3);
        assert_eq!(payload.kind, MovementKind::Exit);
        assert_eq!(payload.quantity, 2.5);
        assert_eq!(payload.reason.as_deref(), Some("Pedido 42"));
        assert_eq!(payload.user, None);
    }

    #[test]
    fn movement_draft_requires_positive_quantity() {
        let mut draft = MovementDraft::for_product(1);
        assert_eq!(
            draft.to_payload().unwrap_err().to_string(),
            "La cantidad es obligatoria"
        );

        draft.quantity = "0".into();
        assert_eq!(
            draft.to_payload().unwrap_err().to_string(),
            "La cantidad debe ser mayor que 0."
        );
    }

    #[test]
    fn movement_draft_rejects_non_numeric_product() {
        let draft = MovementDraft {
            product_id: "abc".into(),
            quantity: "1".into(),
            ..MovementDraft::default()
        };
        assert!(matches!(
            draft.to_payload().unwrap_err(),
            CoreError::Validation { .. }
        ));
    }

    #[test]
    fn kind_field_is_not_text_editable() {
        let mut draft = MovementDraft::default();
        assert!(draft.field_mut(1).is_none());
        assert_eq!(draft.field(1), Some("entrada"));
    }
}
