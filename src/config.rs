use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "EchoRemedy";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_API_NINJAS_BASE_URL: &str = "https://api.api-ninjas.com/v1";
pub const DEFAULT_REFERENCE_IMAGE_BASE_URL: &str = "https://images.echoremedy.app/reference";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 30;

/// Get the application data directory
/// ~/EchoRemedy/ on all platforms, falling back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

pub fn default_db_path() -> PathBuf {
    app_data_dir().join("echoremedy.db")
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "echoremedy=info,echoremedy_lib=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub api_ninjas_key: Option<String>,
    pub api_ninjas_base_url: String,
    pub upstream_timeout_secs: u64,
    pub reference_image_base_url: String,
    pub rate_limit_per_minute: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present; every variable has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: get_var_or("ECHOREMEDY_HOST", DEFAULT_HOST),
            port: parse_var("ECHOREMEDY_PORT", DEFAULT_PORT)?,
            db_path: get_var("ECHOREMEDY_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            openrouter_api_key: get_var("OPENROUTER_API_KEY"),
            openrouter_base_url: get_var_or("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
            api_ninjas_key: get_var("API_NINJAS_KEY"),
            api_ninjas_base_url: get_var_or("API_NINJAS_BASE_URL", DEFAULT_API_NINJAS_BASE_URL),
            upstream_timeout_secs: parse_var(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?,
            reference_image_base_url: get_var_or(
                "REFERENCE_IMAGE_BASE_URL",
                DEFAULT_REFERENCE_IMAGE_BASE_URL,
            ),
            rate_limit_per_minute: parse_var(
                "RATE_LIMIT_PER_MINUTE",
                DEFAULT_RATE_LIMIT_PER_MINUTE,
            )?,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "ECHOREMEDY_HOST",
                reason: e.to_string(),
            })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: default_db_path(),
            openrouter_api_key: None,
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            api_ninjas_key: None,
            api_ninjas_base_url: DEFAULT_API_NINJAS_BASE_URL.to_string(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            reference_image_base_url: DEFAULT_REFERENCE_IMAGE_BASE_URL.to_string(),
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
        }
    }
}

/// Set and non-blank, trimmed.
fn get_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn get_var_or(key: &str, default: &str) -> String {
    get_var(key).unwrap_or_else(|| default.to_owned())
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_var(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ECHOREMEDY_HOST",
        "ECHOREMEDY_PORT",
        "ECHOREMEDY_DB_PATH",
        "OPENROUTER_API_KEY",
        "API_NINJAS_KEY",
        "UPSTREAM_TIMEOUT_SECS",
        "RATE_LIMIT_PER_MINUTE",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("EchoRemedy"));
        assert!(default_db_path().ends_with("EchoRemedy/echoremedy.db"));
    }

    #[test]
    fn app_name_is_echoremedy() {
        assert_eq!(APP_NAME, "EchoRemedy");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn from_env_reads_overrides() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_vars();
        env::set_var("ECHOREMEDY_PORT", "9100");
        env::set_var("ECHOREMEDY_DB_PATH", "/tmp/echoremedy-test.db");
        env::set_var("OPENROUTER_API_KEY", "sk-test");
        env::set_var("RATE_LIMIT_PER_MINUTE", "5");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/echoremedy-test.db"));
        assert_eq!(cfg.openrouter_api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.rate_limit_per_minute, 5);

        clear_vars();
    }

    #[test]
    fn blank_key_is_treated_as_missing() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_vars();
        env::set_var("API_NINJAS_KEY", "   ");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert!(cfg.api_ninjas_key.is_none());

        clear_vars();
    }

    #[test]
    fn invalid_port_is_rejected() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_vars();
        env::set_var("ECHOREMEDY_PORT", "not-a-port");

        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().starts_with("invalid ECHOREMEDY_PORT"));

        clear_vars();
    }

    #[test]
    fn bind_addr_formats_correctly() {
        let cfg = AppConfig {
            port: 3000,
            ..AppConfig::default()
        };
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn default_filter_targets_crate() {
        assert!(default_log_filter().contains("echoremedy"));
        assert!(!default_log_filter().contains("tower_http"));
    }
}
