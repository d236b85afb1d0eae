//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::{PgAccountsRepository, records::UserUuid},
        products::{
            data::{NewCategory, NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            records::{CategoryRecord, ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    accounts: PgAccountsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            accounts: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        user: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let store = self
            .accounts
            .find_store_by_user(&mut tx, user)
            .await?
            .ok_or(ProductsServiceError::NoStore)?;

        let created = self
            .repository
            .create_product(&mut tx, store.uuid, product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let store = self
            .accounts
            .find_store_by_user(&mut tx, user)
            .await?
            .ok_or(ProductsServiceError::NoStore)?;

        let updated = self
            .repository
            .update_product(&mut tx, store.uuid, product, update)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let store = self
            .accounts
            .find_store_by_user(&mut tx, user)
            .await?
            .ok_or(ProductsServiceError::NoStore)?;

        let rows_affected = self
            .repository
            .delete_product(&mut tx, store.uuid, product)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product in the user's store.
    async fn create_product(
        &self,
        user: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product in the user's store. Existing order snapshots are untouched.
    async fn update_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product in the user's store.
    async fn delete_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// Creates a product category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, ProductsServiceError>;
}
