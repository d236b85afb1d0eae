//! Marketplace Domain Concerns

pub mod accounts;
pub(crate) mod columns;
pub mod orders;
pub mod products;
pub mod snapshots;
