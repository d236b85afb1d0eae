//! App Router

use salvo::Router;

use crate::{auth, orders, products};

/// Routes that require a bearer token.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}
