//! Accounts: buyers, their store, and their shipping addresses.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::AccountsServiceError;
pub(crate) use repository::PgAccountsRepository;
pub use service::*;
