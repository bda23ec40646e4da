use thiserror::Error;

/// Top-level error type for the `inventario-api` crate.
///
/// Covers every failure mode of the backend client: transport, HTTP
/// status, structured rejections and payload decoding. `inventario-core`
/// maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Backend responses ───────────────────────────────────────────
    /// Non-success status on a read endpoint.
    #[error("Error HTTP: {status}")]
    Http { status: u16 },

    /// Non-success status on a write endpoint. `message` holds the
    /// backend's `{"error": "..."}` text when the body carried one.
    #[error("request rejected (HTTP {status}){}", rejection_suffix(.message.as_deref()))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status carried by this error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } | Self::Rejected { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request never reached the backend or timed out.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The backend's own error message, if it sent one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn rejection_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}
