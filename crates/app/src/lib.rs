//! Marketplace domain and persistence: accounts, catalog, snapshots and checkout.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
