//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::accounts::{
        data::{NewAddress, NewStore, NewUser},
        errors::AccountsServiceError,
        records::{AddressRecord, StoreRecord, UserRecord, UserUuid},
        repository::PgAccountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_store(
        &self,
        user: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_store(&mut tx, user, store).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_store(&self, user: UserUuid) -> Result<StoreRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let store = self
            .repository
            .find_store_by_user(&mut tx, user)
            .await?
            .ok_or(AccountsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(store)
    }

    async fn create_address(
        &self,
        user: UserUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_address(&mut tx, user, address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Registers a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AccountsServiceError>;

    /// Opens the user's store. Fails with `AlreadyExists` when they have one.
    async fn create_store(
        &self,
        user: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, AccountsServiceError>;

    /// Retrieve the store owned by the user.
    async fn get_store(&self, user: UserUuid) -> Result<StoreRecord, AccountsServiceError>;

    /// Adds a shipping address for the user.
    async fn create_address(
        &self,
        user: UserUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, AccountsServiceError>;
}
