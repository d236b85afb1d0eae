//! Shared fixtures for integration tests.

pub(crate) mod helpers;

pub(crate) use context::{Buyer, Seller, TestContext};
