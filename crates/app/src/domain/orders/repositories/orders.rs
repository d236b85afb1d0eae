//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    accounts::records::{AddressUuid, UserUuid},
    columns::{amount_to_i64, try_get_amount},
    orders::{
        data::Pagination,
        invoice::InvoiceCode,
        records::{AddressSummary, OrderRecord, OrderUuid},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");

/// Order header awaiting insertion.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderHeader {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub address_uuid: AddressUuid,
    pub payment_method: String,
    pub total: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the header under `invoice_code`.
    ///
    /// Returns `None`, without aborting the transaction, when the code is
    /// already taken so the caller can retry with another.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrderHeader,
        invoice_code: &InvoiceCode,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let created_at: Option<SqlxTimestamp> = query_scalar(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(order.address_uuid.into_uuid())
            .bind(invoice_code.as_str())
            .bind(&order.payment_method)
            .bind(amount_to_i64(order.total, "total")?)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(created_at.map(SqlxTimestamp::to_jiff))
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Newest orders first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        pagination: Pagination,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(i64::from(pagination.limit))
            .bind(i64::try_from(pagination.offset).unwrap_or(i64::MAX))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            invoice_code: InvoiceCode::from_stored(row.try_get("invoice_code")?),
            payment_method: row.try_get("payment_method")?,
            total: try_get_amount(row, "total")?,
            address: AddressSummary {
                uuid: AddressUuid::from_uuid(row.try_get("address_uuid")?),
                title: row.try_get("address_title")?,
                recipient_name: row.try_get("address_recipient_name")?,
                phone: row.try_get("address_phone")?,
                details: row.try_get("address_details")?,
            },
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
