//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        accounts::records::{AddressUuid, UserUuid},
        orders::invoice::InvoiceCode,
        snapshots::records::{SnapshotRecord, StoreSummary},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub invoice_code: InvoiceCode,
    pub payment_method: String,
    /// Sum of the line item totals at creation.
    pub total: u64,
    pub address: AddressSummary,
    /// Ordered by position in the (sorted) cart.
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub quantity: u64,
    /// Quantity times the snapshot's consumer price.
    pub total: u64,
    pub store: StoreSummary,
    pub snapshot: SnapshotRecord,
}

/// Shipping address as shown on an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSummary {
    pub uuid: AddressUuid,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub details: String,
}
