//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    orders::records::{AddressSummary, OrderItemRecord, OrderRecord},
    snapshots::records::{CategorySummary, SnapshotPhoto, SnapshotRecord, StoreSummary},
};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Human-readable order reference, `INV-` and ten digits
    pub invoice_code: String,

    pub payment_method: String,

    /// Sum of the item totals
    pub total: u64,

    pub address: AddressResponse,

    /// Items in checkout order
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub uuid: Uuid,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub quantity: u64,

    /// Quantity times the consumer price at checkout
    pub total: u64,

    pub store: StoreResponse,

    /// The product as it was when the order was placed
    pub product: ProductSnapshotResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    pub uuid: Uuid,
    pub name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSnapshotResponse {
    /// Snapshot identifier
    pub uuid: Uuid,

    /// The live product this was copied from; it may since have changed or been deleted
    pub product_uuid: Uuid,

    pub name: String,
    pub slug: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub description: String,
    pub category: CategoryResponse,
    pub photos: Vec<PhotoResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PhotoResponse {
    /// Snapshot photo UUID
    pub uuid: Uuid,
    pub url: String,
    pub position: u32,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            invoice_code: order.invoice_code.into_string(),
            payment_method: order.payment_method,
            total: order.total,
            address: order.address.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

impl From<AddressSummary> for AddressResponse {
    fn from(address: AddressSummary) -> Self {
        AddressResponse {
            uuid: address.uuid.into(),
            title: address.title,
            recipient_name: address.recipient_name,
            phone: address.phone,
            details: address.details,
        }
    }
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            quantity: item.quantity,
            total: item.total,
            store: item.store.into(),
            product: item.snapshot.into(),
        }
    }
}

impl From<StoreSummary> for StoreResponse {
    fn from(store: StoreSummary) -> Self {
        StoreResponse {
            uuid: store.uuid.into(),
            name: store.name,
            photo_url: store.photo_url,
        }
    }
}

impl From<SnapshotRecord> for ProductSnapshotResponse {
    fn from(snapshot: SnapshotRecord) -> Self {
        ProductSnapshotResponse {
            uuid: snapshot.uuid.into(),
            product_uuid: snapshot.product_uuid.into(),
            name: snapshot.name,
            slug: snapshot.slug,
            reseller_price: snapshot.reseller_price,
            consumer_price: snapshot.consumer_price,
            description: snapshot.description,
            category: snapshot.category.into(),
            photos: snapshot.photos.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CategorySummary> for CategoryResponse {
    fn from(category: CategorySummary) -> Self {
        CategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
        }
    }
}

impl From<SnapshotPhoto> for PhotoResponse {
    fn from(photo: SnapshotPhoto) -> Self {
        PhotoResponse {
            uuid: photo.uuid.into(),
            url: photo.url,
            position: photo.position,
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders. Orders placed by other users are
/// reported as missing.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::orders::{
        MockOrdersService, OrdersServiceError, records::OrderUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_order_returns_snapshot_view() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, 2);
        let photo_uuid = order
            .items
            .first()
            .and_then(|item| item.snapshot.photos.first())
            .map(|photo| photo.uuid.into_uuid())
            .ok_or("fixture has a snapshot photo")?;

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == uuid)
            .return_once(move |_, _| Ok(order));

        orders.expect_create_order().never();
        orders.expect_list_orders().never();

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.invoice_code, "INV-1234567890");
        assert_eq!(body.total, 2_000);
        assert_eq!(body.address.title, "Rumah");

        let item = body.items.first().ok_or("order has an item")?;

        assert_eq!(item.quantity, 2);
        assert_eq!(item.total, 2_000);
        assert_eq!(item.store.name, "Toko Kopi");
        assert_eq!(item.product.name, "Kopi Susu");
        assert_eq!(item.product.consumer_price, 1_000);
        assert_eq!(item.product.category.name, "Minuman");
        assert_eq!(
            item.product.photos.first().map(|photo| photo.uuid),
            Some(photo_uuid)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_not_found_returns_404() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == uuid)
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        orders.expect_create_order().never();
        orders.expect_list_orders().never();

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_malformed_uuid_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();
        orders.expect_create_order().never();
        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders/not-a-uuid")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
