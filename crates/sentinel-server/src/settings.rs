//! Typed service configuration.
//!
//! Values come from an optional `sentinel.toml` in the working directory,
//! overridden by environment variables of the same name in upper case
//! (`PORT`, `HOST`, `CORS_ORIGIN`, `DATABASE_URL`,
//! `DATABASE_MAX_CONNECTIONS`, `DATABASE_ACQUIRE_TIMEOUT_SECS`,
//! `DATABASE_IDLE_TIMEOUT_SECS`, `RUN_MIGRATIONS`, `POLL_INTERVAL_SECS`,
//! `STATIC_DIR`). Anything left unset falls back to [`AppConfig::default`].

use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, Environment, File};
use sentinel_api::ServerConfig;
use sentinel_db::PoolSettings;
use serde::Deserialize;

/// Base name of the optional configuration file.
const CONFIG_FILE: &str = "sentinel";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value had the wrong type.
    #[error("failed to load configuration: {source}")]
    Load {
        /// The underlying config error.
        #[from]
        source: config::ConfigError,
    },

    /// `CORS_ORIGIN` is not a valid header value.
    #[error("invalid CORS origin {origin:?}: {reason}")]
    CorsOrigin {
        /// The rejected value.
        origin: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Allowed CORS origin; unset or empty mirrors the request origin.
    pub cors_origin: Option<String>,
    /// `PostgreSQL` URL; unset or empty selects the in-memory gateway.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub database_max_connections: u32,
    /// Seconds a query waits for a pooled connection.
    pub database_acquire_timeout_secs: u64,
    /// Seconds before an idle connection is closed; `0` keeps it open.
    pub database_idle_timeout_secs: u64,
    /// Apply embedded migrations at startup.
    pub run_migrations: bool,
    /// Seconds between summary poll cycles.
    pub poll_interval_secs: u64,
    /// Directory served for unmatched paths.
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8000,
            cors_origin: None,
            database_url: None,
            database_max_connections: PoolSettings::MAX_CONNECTIONS,
            database_acquire_timeout_secs: PoolSettings::ACQUIRE_TIMEOUT.as_secs(),
            database_idle_timeout_secs: PoolSettings::IDLE_TIMEOUT.as_secs(),
            run_migrations: false,
            poll_interval_secs: 50,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl AppConfig {
    /// Load from `sentinel.toml` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(File::with_name(CONFIG_FILE).required(false), Environment::default())
    }

    /// Load from an explicit file source and environment source.
    pub fn from_sources<S>(file: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(env.try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// The database URL, if one is configured.
    pub fn database_url(&self) -> Option<&str> {
        non_empty(self.database_url.as_deref())
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_settings(&self) -> Option<PoolSettings> {
        self.database_url().map(|url| PoolSettings {
            max_connections: self.database_max_connections,
            acquire_timeout: Duration::from_secs(self.database_acquire_timeout_secs),
            idle_timeout: (self.database_idle_timeout_secs > 0)
                .then_some(Duration::from_secs(self.database_idle_timeout_secs)),
            ..PoolSettings::new(url)
        })
    }

    /// Interval between poll cycles.
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Build the HTTP server configuration.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let cors_origin = non_empty(self.cors_origin.as_deref())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::CorsOrigin {
                    origin: origin.to_owned(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(ServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origin,
            static_dir: self.static_dir.clone(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use config::FileFormat;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Environment::default().source(Some(map))
    }

    fn load(toml: &str, vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        AppConfig::from_sources(File::from_str(toml, FileFormat::Toml), env(vars))
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load("", &[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(50));
        assert!(config.database_url().is_none());
    }

    #[test]
    fn environment_overrides_file() {
        let config = load(
            "port = 9000\nhost = \"127.0.0.1\"",
            &[("PORT", "8100"), ("RUN_MIGRATIONS", "true"), ("POLL_INTERVAL_SECS", "5")],
        )
        .unwrap();
        assert_eq!(config.port, 8100);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.run_migrations);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = load("", &[("DATABASE_URL", " "), ("CORS_ORIGIN", "")]).unwrap();
        assert!(config.database_url().is_none());
        assert!(config.server_config().unwrap().cors_origin.is_none());
    }

    #[test]
    fn cors_origin_is_validated() {
        let config = AppConfig {
            cors_origin: Some(String::from("https://sentinel.example")),
            ..AppConfig::default()
        };
        let server = config.server_config().unwrap();
        assert_eq!(server.cors_origin.unwrap(), "https://sentinel.example");

        let bad = AppConfig {
            cors_origin: Some(String::from("bad\norigin")),
            ..AppConfig::default()
        };
        assert!(matches!(
            bad.server_config(),
            Err(ConfigError::CorsOrigin { .. })
        ));
    }

    #[test]
    fn pool_settings_follow_database_keys() {
        assert!(load("", &[]).unwrap().pool_settings().is_none());

        let config = load(
            "database_max_connections = 4",
            &[
                ("DATABASE_URL", "postgresql://sentinel@db/sentinel"),
                ("DATABASE_ACQUIRE_TIMEOUT_SECS", "2"),
                ("DATABASE_IDLE_TIMEOUT_SECS", "0"),
            ],
        )
        .unwrap();
        let pool = config.pool_settings().unwrap();
        assert_eq!(pool.url, "postgresql://sentinel@db/sentinel");
        assert_eq!(pool.max_connections, 4);
        assert_eq!(pool.acquire_timeout, Duration::from_secs(2));
        assert!(pool.idle_timeout.is_none());

        let defaults = load("", &[("DATABASE_URL", "postgresql://db/sentinel")])
            .unwrap()
            .pool_settings()
            .unwrap();
        assert_eq!(defaults, PoolSettings::new("postgresql://db/sentinel"));
    }

    #[test]
    fn malformed_number_is_a_load_error() {
        let result = load("", &[("PORT", "eighty")]);
        assert!(matches!(result, Err(ConfigError::Load { .. })));
    }
}
