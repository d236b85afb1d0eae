//! Orders service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::domain::{products::records::ProductUuid, snapshots::records::SnapshotUuid};

/// SQLSTATE raised when `lock_timeout` expires.
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Problems with the shape of an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("quantity for product {0} must be at least 1")]
    ZeroQuantity(ProductUuid),

    #[error("shipping address is required")]
    MissingAddress,

    #[error("payment method is required")]
    MissingPaymentMethod,
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("invalid order: {0}")]
    Invalid(#[from] OrderValidationError),

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("shipping address not found")]
    AddressNotFound,

    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductUuid,
        requested: u64,
        available: u64,
    },

    #[error("cannot buy product {0} from your own store")]
    SelfPurchase(ProductUuid),

    #[error("order total overflows")]
    TotalOverflow,

    #[error("order not found")]
    NotFound,

    #[error("no orders found")]
    NoOrders,

    #[error("could not allocate a unique invoice code")]
    InvoiceCodeExhausted,

    #[error("order item references missing snapshot {0}")]
    MissingSnapshot(SnapshotUuid),

    #[error("timed out waiting for a product lock")]
    LockTimeout(#[source] Error),

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Coarse classification callers use to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderErrorKind {
    /// The request itself is malformed.
    Validation,

    /// The request is well formed but breaks a rule of the marketplace.
    BusinessRule,

    /// The requested order(s) do not exist for this buyer.
    NotFound,

    /// Storage failed; the request may succeed if retried.
    Infrastructure,
}

impl OrdersServiceError {
    #[must_use]
    pub const fn kind(&self) -> OrderErrorKind {
        match self {
            Self::Invalid(_) => OrderErrorKind::Validation,
            Self::ProductNotFound(_)
            | Self::AddressNotFound
            | Self::InsufficientStock { .. }
            | Self::SelfPurchase(_)
            | Self::TotalOverflow
            | Self::InvalidReference => OrderErrorKind::BusinessRule,
            Self::NotFound | Self::NoOrders => OrderErrorKind::NotFound,
            Self::InvoiceCodeExhausted
            | Self::MissingSnapshot(_)
            | Self::LockTimeout(_)
            | Self::Sql(_) => OrderErrorKind::Infrastructure,
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), OrderErrorKind::Infrastructure)
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if database_error.code().as_deref() == Some(LOCK_NOT_AVAILABLE) {
            return Self::LockTimeout(error);
        }

        match database_error.kind() {
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            ErrorKind::UniqueViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
            | ErrorKind::Other
            | _ => Self::Sql(error),
        }
    }
}
