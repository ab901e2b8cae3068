//! Shell configuration from environment variables.

use std::env;

use bloom_membership::{FilterConfig, FilterError};

/// Configuration for one shell session.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Shape of the session's filter
    pub filter: FilterConfig,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to print responses as JSON instead of plain messages
    pub json_output: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            log_level: "warn".to_string(),
            json_logs: false,
            json_output: false,
        }
    }
}

impl ShellConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BLOOM_SIZE_BITS` / `BLOOM_HASH_COUNT`: filter shape (default: 264 / 2)
    /// - `BLOOM_LOG_LEVEL` or `RUST_LOG`: Log level (default: warn)
    /// - `BLOOM_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `BLOOM_SHELL_JSON`: Print responses as JSON (default: false)
    pub fn from_env() -> Result<Self, FilterError> {
        Ok(Self {
            filter: FilterConfig::from_env()?,

            log_level: env::var("BLOOM_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "warn".to_string()),

            json_logs: flag("BLOOM_JSON_LOGS"),

            json_output: flag("BLOOM_SHELL_JSON"),
        })
    }
}

fn flag(var: &str) -> bool {
    env::var(var)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}
