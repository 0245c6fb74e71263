use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "visionary.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "visionary.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "visionary.db".to_string()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config {
            sqlite_path: "test.db".to_string(),
            request_timeout_seconds: 30,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.sqlite_path, "visionary.db");
        assert_eq!(config.request_timeout_seconds, 10);
    }

    #[test]
    fn test_values_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            "SQLITE_PATH" => Some("/tmp/visionary.db".to_string()),
            "REQUEST_TIMEOUT_SECONDS" => Some("3".to_string()),
            _ => None,
        });

        assert_eq!(config.sqlite_path, "/tmp/visionary.db");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_unparsable_timeout_falls_back() {
        let config = Config::from_lookup(|key| {
            (key == "REQUEST_TIMEOUT_SECONDS").then(|| "soon".to_string())
        });

        assert_eq!(config.request_timeout_seconds, 10);
    }
}
