//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    accounts::records::StoreUuid,
    columns::{amount_to_i64, position_to_i32, try_get_amount, try_get_position},
    products::{
        data::{NewCategory, NewProduct, ProductUpdate},
        records::{
            CategoryRecord, CategoryUuid, ProductPhoto, ProductPhotoUuid, ProductRecord,
            ProductUuid,
        },
    },
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_FOR_CHECKOUT_SQL: &str = include_str!("sql/lock_product_for_checkout.sql");
const GET_PRODUCT_PHOTOS_SQL: &str = include_str!("sql/get_product_photos.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const CREATE_PRODUCT_PHOTOS_SQL: &str = include_str!("sql/create_product_photos.sql");
const DELETE_PRODUCT_PHOTOS_SQL: &str = include_str!("sql/delete_product_photos.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");

/// Photo row tagged with the product it belongs to.
struct ProductPhotoRow {
    product_uuid: ProductUuid,
    photo: ProductPhoto,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut record = query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        record.photos = self.get_photos(tx, product).await?;

        Ok(record)
    }

    /// Read a live product and take its row lock until the transaction ends.
    ///
    /// Soft-deleted products are treated as absent.
    pub(crate) async fn lock_for_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let Some(mut record) = query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_FOR_CHECKOUT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        record.photos = self.get_photos(tx, product).await?;

        Ok(Some(record))
    }

    /// Subtract `quantity` from stock and return what is left.
    ///
    /// Returns `None` when the row is missing or holds less than `quantity`, so
    /// stock can never be driven negative even if a caller skipped its check.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<Option<u64>, sqlx::Error> {
        let remaining: Option<i64> = query_scalar(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(amount_to_i64(quantity, "quantity")?)
            .fetch_optional(&mut **tx)
            .await?;

        remaining
            .map(|stock| {
                u64::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "stock".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let slug = product.slug();

        let mut record = query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(store.into_uuid())
            .bind(product.category_uuid.into_uuid())
            .bind(product.name)
            .bind(slug)
            .bind(amount_to_i64(product.reseller_price, "reseller_price")?)
            .bind(amount_to_i64(product.consumer_price, "consumer_price")?)
            .bind(amount_to_i64(product.stock, "stock")?)
            .bind(product.description)
            .fetch_one(&mut **tx)
            .await?;

        record.photos = self
            .create_photos(tx, product.uuid, &product.photo_urls)
            .await?;

        Ok(record)
    }

    /// Replace a product owned by `store`. Returns `None` when no live product
    /// with that id belongs to the store.
    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let slug = update.slug();

        let Some(mut record) = query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .bind(update.category_uuid.into_uuid())
            .bind(update.name)
            .bind(slug)
            .bind(amount_to_i64(update.reseller_price, "reseller_price")?)
            .bind(amount_to_i64(update.consumer_price, "consumer_price")?)
            .bind(amount_to_i64(update.stock, "stock")?)
            .bind(update.description)
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        query(DELETE_PRODUCT_PHOTOS_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        record.photos = self.create_photos(tx, product, &update.photo_urls).await?;

        Ok(Some(record))
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.name)
            .fetch_one(&mut **tx)
            .await
    }

    async fn get_photos(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<SmallVec<[ProductPhoto; 4]>, sqlx::Error> {
        let mut photos = self.get_photos_for(tx, &[product]).await?;

        Ok(photos.remove(&product).unwrap_or_default())
    }

    /// Fetch the ordered photos of many products in one round trip.
    pub(crate) async fn get_photos_for(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<FxHashMap<ProductUuid, SmallVec<[ProductPhoto; 4]>>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|uuid| uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, ProductPhotoRow>(GET_PRODUCT_PHOTOS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut photos: FxHashMap<ProductUuid, SmallVec<[ProductPhoto; 4]>> =
            FxHashMap::default();

        for row in rows {
            photos.entry(row.product_uuid).or_default().push(row.photo);
        }

        Ok(photos)
    }

    async fn create_photos(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        urls: &[String],
    ) -> Result<SmallVec<[ProductPhoto; 4]>, sqlx::Error> {
        if urls.is_empty() {
            return Ok(SmallVec::new());
        }

        let uuids: Vec<Uuid> = urls.iter().map(|_| Uuid::now_v7()).collect();

        let positions = (0..urls.len())
            .map(|position| position_to_i32(position, "position"))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = query_as::<Postgres, ProductPhotoRow>(CREATE_PRODUCT_PHOTOS_SQL)
            .bind(product.into_uuid())
            .bind(uuids)
            .bind(urls)
            .bind(positions)
            .fetch_all(&mut **tx)
            .await?;

        rows.sort_by_key(|row| row.photo.position);

        Ok(rows.into_iter().map(|row| row.photo).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            store_uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            reseller_price: try_get_amount(row, "reseller_price")?,
            consumer_price: try_get_amount(row, "consumer_price")?,
            stock: try_get_amount(row, "stock")?,
            description: row.try_get("description")?,
            photos: SmallVec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductPhotoRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            photo: ProductPhoto {
                uuid: ProductPhotoUuid::from_uuid(row.try_get("uuid")?),
                url: row.try_get("url")?,
                position: try_get_position(row, "position")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
