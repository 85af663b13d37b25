//! Configuration module for the lobby client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:4567/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the lobby REST API, always ending in `/`
    pub api_url: String,
    /// Per-request timeout of the HTTP data service
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = normalize_api_url(
            &env::var("LOBBY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        );

        let request_timeout = match env::var("LOBBY_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(
                        "Invalid LOBBY_REQUEST_TIMEOUT_SECS {:?}, using {}s",
                        raw,
                        DEFAULT_TIMEOUT_SECS
                    );
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_level = env::var("LOBBY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("LOBBY_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            api_url,
            request_timeout,
            log_level,
            log_format,
        }
    }

    /// Same configuration pointed at another API base URL.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_api_url(api_url);
        self
    }
}

fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("LOBBY_API_URL");
        env::remove_var("LOBBY_REQUEST_TIMEOUT_SECS");
        env::remove_var("LOBBY_LOG_LEVEL");
        env::remove_var("LOBBY_LOG_FORMAT");

        let config = Config::from_env();

        assert_eq!(config.api_url, "http://localhost:4567/api/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_api_url_gets_trailing_slash() {
        let config = Config::default().with_api_url("http://127.0.0.1:9000/api");
        assert_eq!(config.api_url, "http://127.0.0.1:9000/api/");

        let config = Config::default().with_api_url("http://127.0.0.1:9000/api/");
        assert_eq!(config.api_url, "http://127.0.0.1:9000/api/");
    }
}
