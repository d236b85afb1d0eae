//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions, query};

/// SQL used to bound how long a checkout waits on a row lock.
pub const SET_LOCK_TIMEOUT_SQL: &str = "SELECT set_config('lock_timeout', $1, true)";

/// SQL used to pin a read transaction to a single snapshot.
pub const SET_READ_ONLY_SNAPSHOT_SQL: &str =
    "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// Default wait for a contended product row before a checkout gives up.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    lock_timeout: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a plain read-committed transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction for checkout with a transaction-local `lock_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or applying the timeout fails.
    pub async fn begin_checkout_transaction(
        &self,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_LOCK_TIMEOUT_SQL)
            .bind(lock_timeout_setting(self.lock_timeout))
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Begin a read-only transaction that sees one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting its mode fails.
    pub async fn begin_read_transaction(
        &self,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_READ_ONLY_SNAPSHOT_SQL).execute(&mut *tx).await?;

        Ok(tx)
    }
}

/// Render a duration the way `PostgreSQL` expects for `lock_timeout`.
///
/// Zero disables the timeout in `PostgreSQL`, so it is clamped to one millisecond.
fn lock_timeout_setting(timeout: Duration) -> String {
    let millis = timeout.as_millis().max(1);

    format!("{millis}ms")
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Connect to `PostgreSQL` with a bounded pool size.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with_max_connections(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_timeout_renders_in_milliseconds() {
        assert_eq!(lock_timeout_setting(Duration::from_millis(250)), "250ms");
        assert_eq!(lock_timeout_setting(Duration::from_secs(5)), "5000ms");
    }

    #[test]
    fn zero_lock_timeout_is_clamped() {
        assert_eq!(lock_timeout_setting(Duration::ZERO), "1ms");
    }
}
