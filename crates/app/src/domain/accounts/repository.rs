//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::accounts::{
    data::{NewAddress, NewStore, NewUser},
    records::{AddressRecord, AddressUuid, StoreRecord, StoreUuid, UserRecord, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const FIND_STORE_BY_USER_SQL: &str = include_str!("sql/find_store_by_user.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const ADDRESS_BELONGS_TO_USER_SQL: &str = include_str!("sql/address_belongs_to_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(store.name)
            .bind(store.photo_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_store_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(FIND_STORE_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(CREATE_ADDRESS_SQL)
            .bind(address.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(address.title)
            .bind(address.recipient_name)
            .bind(address.phone)
            .bind(address.details)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn address_belongs_to_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressUuid,
        user: UserUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ADDRESS_BELONGS_TO_USER_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            name: row.try_get("name")?,
            photo_url: row.try_get("photo_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            title: row.try_get("title")?,
            recipient_name: row.try_get("recipient_name")?,
            phone: row.try_get("phone")?,
            details: row.try_get("details")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
