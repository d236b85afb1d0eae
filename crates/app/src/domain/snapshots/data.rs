//! Snapshot Data

use smallvec::SmallVec;

use crate::domain::{
    accounts::records::StoreUuid,
    products::records::{CategoryUuid, ProductRecord, ProductUuid},
    snapshots::records::{SnapshotPhotoUuid, SnapshotUuid},
};

/// New Snapshot Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSnapshot {
    pub uuid: SnapshotUuid,
    pub product_uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub description: String,
    pub photos: SmallVec<[NewSnapshotPhoto; 4]>,
}

/// New Snapshot Photo Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnapshotPhoto {
    pub uuid: SnapshotPhotoUuid,
    pub url: String,
    pub position: u32,
}

impl NewSnapshot {
    /// Copy the sale-relevant fields of `product`.
    ///
    /// Every snapshot and photo gets a fresh id, so later edits to the
    /// product or its photos cannot reach the copy.
    #[must_use]
    pub fn capture(product: &ProductRecord) -> Self {
        Self {
            uuid: SnapshotUuid::new(),
            product_uuid: product.uuid,
            store_uuid: product.store_uuid,
            category_uuid: product.category_uuid,
            name: product.name.clone(),
            slug: product.slug.clone(),
            reseller_price: product.reseller_price,
            consumer_price: product.consumer_price,
            description: product.description.clone(),
            photos: product
                .photos
                .iter()
                .map(|photo| NewSnapshotPhoto {
                    uuid: SnapshotPhotoUuid::new(),
                    url: photo.url.clone(),
                    position: photo.position,
                })
                .collect(),
        }
    }
}
