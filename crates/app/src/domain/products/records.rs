//! Product Records

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::{domain::accounts::records::StoreUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// The live, mutable catalog row. Orders never point at this directly.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub stock: u64,
    pub description: String,
    pub photos: SmallVec<[ProductPhoto; 4]>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Product Photo UUID
pub type ProductPhotoUuid = TypedUuid<ProductPhoto>;

/// Product Photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPhoto {
    pub uuid: ProductPhotoUuid,
    pub url: String,
    pub position: u32,
}

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
}
