use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "healthrisk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default address of the local inference service.
pub const DEFAULT_INFERENCE_URL: &str = "http://127.0.0.1:5000";

/// Upper bound on a single prediction round-trip.
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

const ENV_BIND_ADDR: &str = "HEALTHRISK_BIND_ADDR";
const ENV_DB_PATH: &str = "HEALTHRISK_DB_PATH";
const ENV_INFERENCE_URL: &str = "HEALTHRISK_INFERENCE_URL";
const ENV_INFERENCE_TIMEOUT_MS: &str = "HEALTHRISK_INFERENCE_TIMEOUT_MS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Default tracing filter, overridden by `RUST_LOG`.
pub fn default_log_filter() -> &'static str {
    "healthrisk=info,tower_http=info"
}

/// Get the application data directory.
/// Falls back to the working directory when the platform has no data dir.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the record database.
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("records.db")
}

/// Where and how to reach the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INFERENCE_URL, DEFAULT_INFERENCE_TIMEOUT)
    }
}

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub inference: InferenceConfig,
}

impl AppConfig {
    /// Build the configuration from `HEALTHRISK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_BIND_ADDR,
            value: bind_raw.clone(),
        })?;

        let database_path = lookup(ENV_DB_PATH)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let base_url =
            lookup(ENV_INFERENCE_URL).unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: ENV_INFERENCE_URL,
                value: base_url,
            });
        }

        let timeout = match lookup(ENV_INFERENCE_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: ENV_INFERENCE_TIMEOUT_MS,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_INFERENCE_TIMEOUT,
        };

        Ok(Self {
            bind_addr,
            database_path,
            inference: InferenceConfig::new(&base_url, timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.inference.base_url, DEFAULT_INFERENCE_URL);
        assert_eq!(config.inference.timeout, Duration::from_secs(5));
        assert!(config.database_path.ends_with("records.db"));
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HEALTHRISK_BIND_ADDR", "0.0.0.0:8080"),
            ("HEALTHRISK_DB_PATH", "/tmp/records.db"),
            ("HEALTHRISK_INFERENCE_URL", "http://ml.internal:5000/"),
            ("HEALTHRISK_INFERENCE_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_path, PathBuf::from("/tmp/records.db"));
        assert_eq!(config.inference.base_url, "http://ml.internal:5000");
        assert_eq!(config.inference.timeout, Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let result = AppConfig::from_lookup(lookup_from(&[("HEALTHRISK_BIND_ADDR", "nope")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { var: "HEALTHRISK_BIND_ADDR", .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let result =
            AppConfig::from_lookup(lookup_from(&[("HEALTHRISK_INFERENCE_TIMEOUT_MS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_http_inference_url() {
        let result =
            AppConfig::from_lookup(lookup_from(&[("HEALTHRISK_INFERENCE_URL", "ftp://x")]));
        assert!(result.is_err());
    }

    #[test]
    fn inference_config_trims_trailing_slash() {
        let config = InferenceConfig::new("http://localhost:5000/", Duration::from_secs(1));
        assert_eq!(config.base_url, "http://localhost:5000");
    }

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with(APP_NAME));
    }
}
