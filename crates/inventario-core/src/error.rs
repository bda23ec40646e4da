// ── Core error types ──
//
// User-facing errors from inventario-core. `Display` yields the text that
// ends up in a banner, so wording is Spanish like the rest of the UI.
// The `From<inventario_api::Error>` impl translates transport-layer errors
// into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("No se pudo conectar con el servidor: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Tiempo de espera agotado")]
    Timeout,

    // ── Backend responses ────────────────────────────────────────────
    #[error("Error HTTP: {status}")]
    Http { status: u16 },

    /// A write the backend refused; `message` is its `{"error"}` text or
    /// the operation's fallback.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Respuesta no válida del servidor: {message}")]
    InvalidResponse { message: String },

    // ── Client-side errors ───────────────────────────────────────────
    #[error("{message}")]
    Validation { message: String },

    #[error("Configuración no válida: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Convert a failed write, substituting `fallback` when the backend
    /// rejected the request without saying why.
    pub(crate) fn from_write(err: inventario_api::Error, fallback: &str) -> Self {
        match err {
            inventario_api::Error::Rejected { message, .. } => Self::Rejected {
                message: message.unwrap_or_else(|| fallback.to_owned()),
            },
            other => other.into(),
        }
    }

    /// HTTP status behind this error, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<inventario_api::Error> for CoreError {
    fn from(err: inventario_api::Error) -> Self {
        match err {
            inventario_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if let Some(status) = e.status() {
                    CoreError::Http {
                        status: status.as_u16(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                }
            }
            inventario_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("URL no válida: {e}"),
            },
            inventario_api::Error::ClientBuild(message) => CoreError::Config { message },
            inventario_api::Error::Http { status } => CoreError::Http { status },
            inventario_api::Error::Rejected { status, message } => match message {
                Some(message) => CoreError::Rejected { message },
                None => CoreError::Http { status },
            },
            inventario_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn http_status_renders_like_the_banner() {
        let err = CoreError::from(inventario_api::Error::Http { status: 500 });
        assert_eq!(err.to_string(), "Error HTTP: 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn write_rejection_prefers_backend_message() {
        let err = CoreError::from_write(
            inventario_api::Error::Rejected {
                status: 400,
                message: Some("Producto no encontrado".into()),
            },
            "Error al registrar movimiento",
        );
        assert_eq!(err.to_string(), "Producto no encontrado");
    }

    #[test]
    fn write_rejection_without_message_uses_fallback() {
        let err = CoreError::from_write(
            inventario_api::Error::Rejected {
                status: 500,
                message: None,
            },
            "Error al crear producto",
        );
        assert_eq!(err.to_string(), "Error al crear producto");
    }
}
