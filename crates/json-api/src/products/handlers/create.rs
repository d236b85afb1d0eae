//! Create Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::products::data::NewProduct;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Create Product Request
///
/// The product is always created in the caller's own store.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub uuid: Uuid,
    pub category_uuid: Uuid,
    pub name: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub stock: u64,
    #[serde(default)]
    pub description: String,
    /// Photo URLs in display order
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.into(),
            category_uuid: request.category_uuid.into(),
            name: request.name,
            reseller_price: request.reseller_price,
            consumer_price: request.consumer_price,
            stock: request.stock,
            description: request.description,
            photo_urls: request.photo_urls,
        }
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Created product UUID
    pub uuid: Uuid,

    /// Slug derived from the name
    pub slug: String,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller has no store"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let product = state
        .app
        .products
        .create_product(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.created(&format!("/products/{}", product.uuid))?;

    Ok(Json(ProductCreatedResponse {
        uuid: product.uuid.into(),
        slug: product.slug,
    }))
}
