//! Database Config

use std::time::Duration;

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10_u32)]
    pub database_max_connections: u32,

    /// How long a checkout waits for a product row lock before giving up.
    #[arg(long, env = "CHECKOUT_LOCK_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub checkout_lock_timeout_ms: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.checkout_lock_timeout_ms)
    }
}
