//! Account Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record
#[derive(Debug, Clone)]
pub struct StoreRecord {
    pub uuid: StoreUuid,
    pub user_uuid: UserUuid,
    pub name: String,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}

/// Address UUID
pub type AddressUuid = TypedUuid<AddressRecord>;

/// Shipping Address Record
#[derive(Debug, Clone)]
pub struct AddressRecord {
    pub uuid: AddressUuid,
    pub user_uuid: UserUuid,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub details: String,
    pub created_at: Timestamp,
}
