//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Replaces every field, photos included. Orders already placed keep the
/// product as it was at checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub category_uuid: Uuid,
    pub name: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub stock: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
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

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found in the caller's store"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller has no store"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        consumer_price = tracing::field::Empty,
        stock = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));
    span.record("consumer_price", request.consumer_price);
    span.record("stock", request.stock);

    let updated = state
        .app
        .products
        .update_product(user, product.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, stock = updated.stock, "updated product");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let mut product = make_product(uuid);

        product.name = "Kopi Susu Besar".to_string();
        product.slug = "kopi-susu-besar".to_string();
        product.consumer_price = 1_500;

        let category = product.category_uuid;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |user, p, update| {
                *user == TEST_USER_UUID
                    && *p == uuid
                    && *update
                        == ProductUpdate {
                            category_uuid: category,
                            name: "Kopi Susu Besar".to_string(),
                            reseller_price: 1_200,
                            consumer_price: 1_500,
                            stock: 10,
                            description: String::new(),
                            photo_urls: Vec::new(),
                        }
            })
            .return_once(move |_, _, _| Ok(product));

        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_delete_product().never();

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({
                "category_uuid": category.into_uuid(),
                "name": "Kopi Susu Besar",
                "reseller_price": 1200,
                "consumer_price": 1500,
                "stock": 10,
            }))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.slug, "kopi-susu-besar");
        assert_eq!(body.consumer_price, 1_500);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_of_other_store_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({
                "category_uuid": Uuid::now_v7(),
                "name": "Kopi",
                "reseller_price": 800,
                "consumer_price": 1000,
                "stock": 1,
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
