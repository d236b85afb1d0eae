//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Marketplace JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "marketplace-json", about = "Marketplace JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_is_given() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "marketplace-json",
            "--database-url",
            "postgres://localhost/marketplace",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.database.database_max_connections, 10);
        assert_eq!(config.database.lock_timeout(), Duration::from_secs(5));

        Ok(())
    }

    #[test]
    fn checkout_lock_timeout_is_configurable() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "marketplace-json",
            "--database-url",
            "postgres://localhost/marketplace",
            "--checkout-lock-timeout-ms",
            "250",
        ])?;

        assert_eq!(config.database.lock_timeout(), Duration::from_millis(250));

        Ok(())
    }
}
