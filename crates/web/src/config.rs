//! Web server configuration.

use std::env;

use common::ServiceConfig;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl WebConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("WEB_HOST").unwrap_or(defaults.host),
            port: env::var("WEB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        let service = ServiceConfig::default();
        Self {
            host: service.host,
            port: service.port,
        }
    }
}
