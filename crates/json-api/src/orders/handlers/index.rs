//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::orders::data::Pagination;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The caller's orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Returns one page of the caller's orders. `page` is 1-based; a missing or
/// non-positive `page` or `limit` falls back to the first page of ten, and
/// `limit` is capped at 100.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders found"),
        (status_code = StatusCode::NOT_FOUND, description = "No orders on this page"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user, Pagination::new(page.into_inner(), limit.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
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
        orders_service(orders, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_defaults_to_first_page() -> TestResult {
        let newer = OrderUuid::new();
        let older = OrderUuid::new();
        let page = vec![make_order(newer, 1), make_order(older, 3)];

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|user, pagination| {
                *user == TEST_USER_UUID && *pagination == Pagination { limit: 10, offset: 0 }
            })
            .return_once(move |_, _| Ok(page));

        orders.expect_create_order().never();
        orders.expect_get_order().never();

        let mut res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        let body: OrdersResponse = res.take_json().await?;

        let uuids: Vec<_> = body.orders.iter().map(|order| order.uuid).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(uuids, vec![newer.into_uuid(), older.into_uuid()]);
        assert_eq!(
            body.orders.iter().map(|order| order.total).collect::<Vec<_>>(),
            vec![1_000, 3_000]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_passes_page_and_limit() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|_, pagination| *pagination == Pagination { limit: 5, offset: 10 })
            .return_once(|_, _| Ok(vec![make_order(OrderUuid::new(), 1)]));

        orders.expect_create_order().never();
        orders.expect_get_order().never();

        let res = TestClient::get("http://example.com/orders?page=3&limit=5")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_caps_oversized_limit() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|_, pagination| *pagination == Pagination { limit: 100, offset: 0 })
            .return_once(|_, _| Ok(vec![make_order(OrderUuid::new(), 1)]));

        orders.expect_create_order().never();
        orders.expect_get_order().never();

        let res = TestClient::get("http://example.com/orders?limit=100000")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_empty_page_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NoOrders));

        orders.expect_create_order().never();
        orders.expect_get_order().never();

        let res = TestClient::get("http://example.com/orders?page=9")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
