//! API configuration.

use common::{env_var, ServiceConfig};
use user_service_lib::config::UserServiceConfig;

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Deployment environment name (`production`, `staging`, `development`, ...)
    pub environment: String,
    /// HTTP server settings
    pub server: ServiceConfig,
    /// Storage backend and pool settings
    pub user_service: UserServiceConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ServiceConfig::default();

        Self {
            environment: env_var("ENV").unwrap_or_else(|| "production".to_string()),
            server: ServiceConfig {
                service_name: defaults.service_name,
                host: env_var("SERVER_HOST").unwrap_or(defaults.host),
                port: env_var("PORT")
                    .or_else(|| env_var("SERVER_PORT"))
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
                log_level: env_var("LOG_LEVEL").unwrap_or(defaults.log_level),
            },
            user_service: UserServiceConfig::from_env(),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        self.server.addr()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            server: ServiceConfig::default(),
            user_service: UserServiceConfig::default(),
        }
    }
}
