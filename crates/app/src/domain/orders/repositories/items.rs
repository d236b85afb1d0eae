//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::records::StoreUuid,
    columns::{amount_to_i64, position_to_i32, try_get_amount, try_get_position},
    orders::records::{OrderItemUuid, OrderUuid},
    snapshots::records::{SnapshotUuid, StoreSummary},
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

/// Line item awaiting insertion. `position` is its index in the sorted cart.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub snapshot_uuid: SnapshotUuid,
    pub store_uuid: StoreUuid,
    pub position: usize,
    pub quantity: u64,
    pub total: u64,
}

/// Stored line item before its snapshot is attached.
#[derive(Debug, Clone)]
pub(crate) struct OrderItemRow {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub snapshot_uuid: SnapshotUuid,
    pub position: u32,
    pub quantity: u64,
    pub total: u64,
    pub store: StoreSummary,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every line item of an order in one statement.
    pub(crate) async fn create_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[NewOrderItem],
    ) -> Result<u64, sqlx::Error> {
        let mut uuids = Vec::with_capacity(items.len());
        let mut snapshots = Vec::with_capacity(items.len());
        let mut stores = Vec::with_capacity(items.len());
        let mut positions = Vec::with_capacity(items.len());
        let mut quantities = Vec::with_capacity(items.len());
        let mut totals = Vec::with_capacity(items.len());

        for item in items {
            uuids.push(item.uuid.into_uuid());
            snapshots.push(item.snapshot_uuid.into_uuid());
            stores.push(item.store_uuid.into_uuid());
            positions.push(position_to_i32(item.position, "position")?);
            quantities.push(amount_to_i64(item.quantity, "quantity")?);
            totals.push(amount_to_i64(item.total, "total")?);
        }

        let rows_affected = query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(snapshots)
            .bind(stores)
            .bind(positions)
            .bind(quantities)
            .bind(totals)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Line items of all `orders`, grouped by order and in position order.
    pub(crate) async fn get_items_for(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRow>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, OrderItemRow>(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            snapshot_uuid: SnapshotUuid::from_uuid(row.try_get("snapshot_uuid")?),
            position: try_get_position(row, "position")?,
            quantity: try_get_amount(row, "quantity")?,
            total: try_get_amount(row, "total")?,
            store: StoreSummary {
                uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
                name: row.try_get("store_name")?,
                photo_url: row.try_get("store_photo_url")?,
            },
        })
    }
}
