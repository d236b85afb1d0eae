//! Accounts Data

use crate::domain::accounts::records::{AddressUuid, StoreUuid, UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

/// New Store Data
///
/// A user owns at most one store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub photo_url: Option<String>,
}

/// New Address Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub uuid: AddressUuid,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub details: String,
}
