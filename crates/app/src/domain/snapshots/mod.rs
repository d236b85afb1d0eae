//! Product Snapshots
//!
//! Immutable copies of a product taken at the moment it is bought. Order
//! line items reference these instead of the live catalog row.

pub mod data;
pub mod records;
mod repository;

pub(crate) use repository::PgSnapshotsRepository;
