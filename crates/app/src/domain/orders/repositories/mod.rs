//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{NewOrderItem, OrderItemRow, PgOrderItemsRepository};
pub(crate) use orders::{NewOrderHeader, PgOrdersRepository};
