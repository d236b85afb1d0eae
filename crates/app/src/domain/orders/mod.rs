//! Orders: checkout and the buyer's order history.

pub mod data;
pub mod errors;
pub mod invoice;
pub mod records;
mod repositories;
pub mod service;

pub use errors::{OrderErrorKind, OrderValidationError, OrdersServiceError};
pub use service::*;
