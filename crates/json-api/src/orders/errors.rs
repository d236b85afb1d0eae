//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use marketplace_app::domain::orders::{OrderErrorKind, OrdersServiceError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error.kind() {
        OrderErrorKind::Validation => StatusError::bad_request().brief(error.to_string()),
        OrderErrorKind::BusinessRule => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        OrderErrorKind::NotFound => StatusError::not_found().brief(error.to_string()),
        OrderErrorKind::Infrastructure => {
            if let OrdersServiceError::LockTimeout(source) = &error {
                warn!("checkout gave up waiting for a product lock: {source}");

                return StatusError::service_unavailable()
                    .brief("Products in this order are busy, please retry");
            }

            error!("order request failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Label for the checkout outcome counter.
pub(crate) fn checkout_outcome(result: Result<(), &OrdersServiceError>) -> &'static str {
    match result.map_err(|error| error.kind()) {
        Ok(()) => "created",
        Err(OrderErrorKind::Validation | OrderErrorKind::BusinessRule) => "rejected",
        Err(OrderErrorKind::NotFound | OrderErrorKind::Infrastructure) => "failed",
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use marketplace_app::domain::{
        orders::OrderValidationError, products::records::ProductUuid,
        snapshots::records::SnapshotUuid,
    };

    use super::*;

    #[test]
    fn validation_is_bad_request() {
        let status = into_status_error(OrderValidationError::EmptyCart.into());

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "invalid order: cart is empty");
    }

    #[test]
    fn business_rules_are_unprocessable() {
        let product = ProductUuid::new();

        for error in [
            OrdersServiceError::ProductNotFound(product),
            OrdersServiceError::AddressNotFound,
            OrdersServiceError::SelfPurchase(product),
            OrdersServiceError::TotalOverflow,
            OrdersServiceError::InsufficientStock {
                product,
                requested: 3,
                available: 1,
            },
        ] {
            assert_eq!(
                into_status_error(error).code,
                StatusCode::UNPROCESSABLE_ENTITY,
                "business rule errors map to 422"
            );
        }
    }

    #[test]
    fn missing_orders_are_not_found() {
        assert_eq!(
            into_status_error(OrdersServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            into_status_error(OrdersServiceError::NoOrders).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn lock_timeout_is_service_unavailable() {
        let error = OrdersServiceError::LockTimeout(sqlx::Error::PoolTimedOut);

        assert_eq!(into_status_error(error).code, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn other_infrastructure_failures_are_internal() {
        assert_eq!(
            into_status_error(OrdersServiceError::InvoiceCodeExhausted).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            into_status_error(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            into_status_error(OrdersServiceError::MissingSnapshot(SnapshotUuid::new())).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn checkout_outcomes_follow_error_kind() {
        assert_eq!(checkout_outcome(Ok(())), "created");
        assert_eq!(
            checkout_outcome(Err(&OrdersServiceError::AddressNotFound)),
            "rejected"
        );
        assert_eq!(
            checkout_outcome(Err(&OrdersServiceError::InvoiceCodeExhausted)),
            "failed"
        );
    }
}
