// Shared transport configuration for building reqwest::Client instances.
//
// The backend speaks plain JSON over HTTP on the local network, so the
// only knobs are the request timeout and the user agent.

use std::time::Duration;

use crate::error::Error;

const DEFAULT_USER_AGENT: &str = concat!("inventario/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. `None` lets a request wait indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}
