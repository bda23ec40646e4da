// ── Runtime client configuration ──
//
// Describes *where* the backend lives and how patient to be with it.
// Core never reads config files; the TUI builds a `ClientConfig` from
// `inventario-config` and CLI flags and hands it in.

use std::time::Duration;

use inventario_api::TransportConfig;

/// API root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5010/api";

/// Configuration for talking to a single inventory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `http://192.168.5.59:5010/api`.
    pub api_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        match self.timeout {
            Some(timeout) => TransportConfig::default().with_timeout(timeout),
            None => TransportConfig::default(),
        }
    }
}
