//! User service configuration.

use common::{env_var, DatabaseConfig, StorageBackend};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Which store backs the service
    pub backend: StorageBackend,
    /// Relational store settings (unused by the in-memory backend)
    pub database: DatabaseConfig,
}

/// Read and parse an environment variable, falling back on absence or parse failure.
fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_var(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `STORAGE_BACKEND` wins when set and valid; otherwise the backend
    /// follows `ENV` (PostgreSQL for production and staging).
    pub fn from_env() -> Self {
        let environment = env_var("ENV").unwrap_or_else(|| "production".to_string());
        let requested = env_var("STORAGE_BACKEND");
        let backend = match requested.map(|v| v.parse::<StorageBackend>()) {
            Some(Ok(backend)) => backend,
            Some(Err(e)) => {
                tracing::warn!("{}, falling back to ENV={}", e, environment);
                StorageBackend::for_environment(&environment)
            }
            None => StorageBackend::for_environment(&environment),
        };

        let defaults = DatabaseConfig::default();
        Self {
            backend,
            database: DatabaseConfig {
                url: env_var("USER_SERVICE_DATABASE_URL")
                    .or_else(|| env_var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: parsed("DB_MAX_CONNS", defaults.max_connections),
                min_connections: parsed("DB_MIN_CONNS", defaults.min_connections),
                max_lifetime_seconds: parsed(
                    "DB_MAX_CONN_LIFETIME",
                    defaults.max_lifetime_seconds,
                ),
                idle_timeout_seconds: parsed(
                    "DB_MAX_CONN_IDLE_TIME",
                    defaults.idle_timeout_seconds,
                ),
            },
        }
    }

}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Postgres,
            database: DatabaseConfig::default(),
        }
    }
}
