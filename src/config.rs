//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `UPSTREAM_URL` (required): base URL of the service that owns the user business logic
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `UPSTREAM_TIMEOUT_SECS` (optional): per-request timeout towards the upstream, defaults to 10
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub upstream_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_secs: u64,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_upstream_timeout() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., UPSTREAM_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // Field names are automatically converted: upstream_url -> UPSTREAM_URL
        envy::from_env::<Config>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let vars = vec![("UPSTREAM_URL".to_string(), "http://localhost:5000".to_string())];

        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.upstream_url, "http://localhost:5000");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upstream_timeout_secs, 10);
    }

    #[test]
    fn missing_upstream_url_is_an_error() {
        let vars = vec![("SERVER_PORT".to_string(), "8080".to_string())];

        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
