//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from database settings.
    ///
    /// `lock_timeout` bounds how long a checkout waits on a product row.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        lock_timeout: Duration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max_connections(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone()).with_lock_timeout(lock_timeout);

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
