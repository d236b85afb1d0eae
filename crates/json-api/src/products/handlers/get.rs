//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::products::records::{ProductPhoto, ProductRecord};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The store selling the product
    pub store_uuid: Uuid,

    pub category_uuid: Uuid,
    pub name: String,
    pub slug: String,

    /// Price offered to resellers, in the smallest currency unit
    pub reseller_price: u64,

    /// Price charged at checkout, in the smallest currency unit
    pub consumer_price: u64,

    pub stock: u64,
    pub description: String,
    pub photos: Vec<ProductPhotoResponse>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPhotoResponse {
    pub url: String,
    pub position: u32,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            store_uuid: product.store_uuid.into(),
            category_uuid: product.category_uuid.into(),
            name: product.name,
            slug: product.slug,
            reseller_price: product.reseller_price,
            consumer_price: product.consumer_price,
            stock: product.stock,
            description: product.description,
            photos: product.photos.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

impl From<ProductPhoto> for ProductPhotoResponse {
    fn from(photo: ProductPhoto) -> Self {
        ProductPhotoResponse {
            url: photo.url,
            position: photo.position,
        }
    }
}

/// Get Product Handler
///
/// Returns a live product. Deleted products are not found.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
