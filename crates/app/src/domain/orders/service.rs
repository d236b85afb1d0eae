//! Orders service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{error, info, warn};

use crate::{
    database::Db,
    domain::{
        accounts::{PgAccountsRepository, records::UserUuid},
        orders::{
            data::{NewOrder, Pagination},
            errors::OrdersServiceError,
            invoice::{
                InvoiceCode, InvoiceCodeGenerator, MAX_INVOICE_CODE_ATTEMPTS, RandomInvoiceCodes,
            },
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repositories::{
                NewOrderHeader, NewOrderItem, PgOrderItemsRepository, PgOrdersRepository,
            },
        },
        products::PgProductsRepository,
        snapshots::{PgSnapshotsRepository, data::NewSnapshot, records::SnapshotUuid},
    },
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    invoice_codes: Arc<dyn InvoiceCodeGenerator>,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    products_repository: PgProductsRepository,
    snapshots_repository: PgSnapshotsRepository,
    accounts_repository: PgAccountsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_invoice_codes(db, Arc::new(RandomInvoiceCodes))
    }

    #[must_use]
    pub fn with_invoice_codes(db: Db, invoice_codes: Arc<dyn InvoiceCodeGenerator>) -> Self {
        Self {
            db,
            invoice_codes,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            snapshots_repository: PgSnapshotsRepository::new(),
            accounts_repository: PgAccountsRepository::new(),
        }
    }

    /// Insert the order header, drawing a new invoice code whenever the
    /// current one is already taken.
    async fn insert_header(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        header: &NewOrderHeader,
        first_code: InvoiceCode,
    ) -> Result<InvoiceCode, OrdersServiceError> {
        let mut invoice_code = first_code;

        for attempt in 1..=MAX_INVOICE_CODE_ATTEMPTS {
            if attempt > 1 {
                invoice_code = self.invoice_codes.generate();
            }

            if self
                .orders_repository
                .create_order(tx, header, &invoice_code)
                .await?
                .is_some()
            {
                return Ok(invoice_code);
            }

            warn!(attempt, %invoice_code, "invoice code already in use");
        }

        Err(OrdersServiceError::InvoiceCodeExhausted)
    }

    /// Attach line items (with their snapshots) to already-loaded headers.
    ///
    /// Issues the same number of queries however many orders or items there are.
    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let order_uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut rows = self
            .items_repository
            .get_items_for(tx, &order_uuids)
            .await?;

        rows.sort_by_key(|row| row.position);

        let snapshot_uuids: Vec<SnapshotUuid> = rows.iter().map(|row| row.snapshot_uuid).collect();

        let mut snapshots = self
            .snapshots_repository
            .get_snapshots(tx, &snapshot_uuids)
            .await?;

        let mut items_by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for row in rows {
            let Some(snapshot) = snapshots.remove(&row.snapshot_uuid) else {
                error!(
                    order_item_uuid = %row.uuid,
                    snapshot_uuid = %row.snapshot_uuid,
                    "order item references a missing snapshot"
                );

                return Err(OrdersServiceError::MissingSnapshot(row.snapshot_uuid));
            };

            items_by_order
                .entry(row.order_uuid)
                .or_default()
                .push(OrderItemRecord {
                    uuid: row.uuid,
                    quantity: row.quantity,
                    total: row.total,
                    store: row.store,
                    snapshot,
                });
        }

        for order in &mut orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

impl Debug for PgOrdersService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.create",
        skip(self, order),
        fields(user_uuid = %user, lines = order.lines.len()),
        err
    )]
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderUuid, OrdersServiceError> {
        order.validate()?;

        let lines = order.lines_in_lock_order();
        let first_code = self.invoice_codes.generate();

        let mut tx = self.db.begin_checkout_transaction().await?;

        if !self
            .accounts_repository
            .address_belongs_to_user(&mut tx, order.address_uuid, user)
            .await?
        {
            return Err(OrdersServiceError::AddressNotFound);
        }

        let buyer_store = self
            .accounts_repository
            .find_store_by_user(&mut tx, user)
            .await?
            .map(|store| store.uuid);

        let mut total: u64 = 0;
        let mut items = Vec::with_capacity(lines.len());

        for (position, line) in lines.iter().enumerate() {
            let requested = u64::from(line.quantity);

            let product = self
                .products_repository
                .lock_for_checkout(&mut tx, line.product_uuid)
                .await?
                .ok_or(OrdersServiceError::ProductNotFound(line.product_uuid))?;

            if buyer_store == Some(product.store_uuid) {
                warn!(product_uuid = %product.uuid, "rejected purchase from own store");

                return Err(OrdersServiceError::SelfPurchase(product.uuid));
            }

            if product.stock < requested {
                warn!(
                    product_uuid = %product.uuid,
                    requested,
                    available = product.stock,
                    "rejected order with insufficient stock"
                );

                return Err(OrdersServiceError::InsufficientStock {
                    product: product.uuid,
                    requested,
                    available: product.stock,
                });
            }

            self.products_repository
                .decrement_stock(&mut tx, product.uuid, requested)
                .await?
                .ok_or(OrdersServiceError::InsufficientStock {
                    product: product.uuid,
                    requested,
                    available: product.stock,
                })?;

            let snapshot = NewSnapshot::capture(&product);

            self.snapshots_repository
                .create_snapshot(&mut tx, &snapshot)
                .await?;

            let line_total = requested
                .checked_mul(snapshot.consumer_price)
                .ok_or(OrdersServiceError::TotalOverflow)?;

            total = total
                .checked_add(line_total)
                .ok_or(OrdersServiceError::TotalOverflow)?;

            items.push(NewOrderItem {
                uuid: OrderItemUuid::new(),
                snapshot_uuid: snapshot.uuid,
                store_uuid: product.store_uuid,
                position,
                quantity: requested,
                total: line_total,
            });
        }

        if i64::try_from(total).is_err() {
            return Err(OrdersServiceError::TotalOverflow);
        }

        let header = NewOrderHeader {
            uuid: OrderUuid::new(),
            user_uuid: user,
            address_uuid: order.address_uuid,
            payment_method: order.payment_method,
            total,
        };

        let invoice_code = self.insert_header(&mut tx, &header, first_code).await?;

        self.items_repository
            .create_items(&mut tx, header.uuid, &items)
            .await?;

        tx.commit().await?;

        info!(
            order_uuid = %header.uuid,
            %invoice_code,
            total,
            items = items.len(),
            "created order"
        );

        Ok(header.uuid)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let header = self
            .orders_repository
            .get_order(&mut tx, user, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let mut orders = self.attach_items(&mut tx, vec![header]).await?;

        tx.commit().await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        pagination: Pagination,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let headers = self
            .orders_repository
            .list_orders(&mut tx, user, pagination)
            .await?;

        if headers.is_empty() {
            return Err(OrdersServiceError::NoOrders);
        }

        let orders = self.attach_items(&mut tx, headers).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn a cart into an order.
    ///
    /// Either every line is bought (stock decremented, snapshot stored, line
    /// item written) and the order committed, or nothing changes.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderUuid, OrdersServiceError>;

    /// Retrieve one of the buyer's orders with its line items.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a page of the buyer's orders, newest first.
    async fn list_orders(
        &self,
        user: UserUuid,
        pagination: Pagination,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
