//! Create Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::orders::data::{CartLine, NewOrder};

use crate::{
    extensions::*,
    observability::observe_checkout,
    orders::errors::{checkout_outcome, into_status_error},
    state::State,
};

/// Create Order Request
///
/// Missing fields are accepted here and rejected by order validation, so the
/// caller gets a specific reason.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Shipping address owned by the caller
    #[serde(default)]
    pub address_uuid: Option<Uuid>,

    /// Payment method label, e.g. `bank_transfer`
    #[serde(default)]
    pub payment_method: String,

    /// Cart lines; a product listed twice becomes two order items
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

/// One cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            address_uuid: request.address_uuid.unwrap_or_default().into(),
            payment_method: request.payment_method,
            lines: request
                .items
                .into_iter()
                .map(|line| CartLine {
                    product_uuid: line.product_uuid.into(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// Order Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCreatedResponse {
    /// Created order UUID
    pub uuid: Uuid,
}

/// Create Order Handler
///
/// Checks out the submitted cart in a single transaction.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed order"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Order breaks a checkout rule"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Products busy, retry"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create_request",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, line_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("line_count", request.items.len());

    let result = state.app.orders.create_order(user, request.into()).await;

    observe_checkout(checkout_outcome(result.as_ref().map(|_| ())));

    let uuid = result.map_err(into_status_error)?;

    res.created(&format!("/orders/{uuid}"))?;

    Ok(Json(OrderCreatedResponse { uuid: uuid.into() }))
}
