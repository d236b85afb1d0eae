//! Snapshot Records

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::{
    domain::{
        accounts::records::StoreUuid,
        products::records::{CategoryUuid, ProductUuid},
    },
    uuids::TypedUuid,
};

/// Snapshot UUID
pub type SnapshotUuid = TypedUuid<SnapshotRecord>;

/// Product Snapshot Record
#[derive(Debug, Clone)]
pub struct SnapshotRecord {
    pub uuid: SnapshotUuid,
    /// The product this was copied from. May no longer exist.
    pub product_uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub description: String,
    pub store: StoreSummary,
    pub category: CategorySummary,
    pub photos: SmallVec<[SnapshotPhoto; 4]>,
    pub created_at: Timestamp,
}

/// Snapshot Photo UUID
pub type SnapshotPhotoUuid = TypedUuid<SnapshotPhoto>;

/// Snapshot Photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPhoto {
    pub uuid: SnapshotPhotoUuid,
    pub url: String,
    pub position: u32,
}

/// Store display details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub uuid: StoreUuid,
    pub name: String,
    pub photo_url: Option<String>,
}

/// Category display details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub uuid: CategoryUuid,
    pub name: String,
}
