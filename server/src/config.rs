//! Server configuration.
//!
//! Defaults describe the development setup: port 8080 on all interfaces and a
//! single allowed browser origin. They apply whenever no override is set.
//! `from_env` lets a developer move the port or origin without recompiling.

use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Value sent in `Access-Control-Allow-Origin`.
    pub allowed_origin: String,
    /// Emit logs as JSON lines instead of the human-readable format.
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            allowed_origin: lookup("CORS_ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            log_json: lookup("LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(defaults.log_json),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
