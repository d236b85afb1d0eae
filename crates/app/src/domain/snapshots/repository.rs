//! Snapshots Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::records::StoreUuid,
    columns::{amount_to_i64, position_to_i32, try_get_amount, try_get_position},
    products::records::{CategoryUuid, ProductUuid},
    snapshots::{
        data::NewSnapshot,
        records::{
            CategorySummary, SnapshotPhoto, SnapshotPhotoUuid, SnapshotRecord, SnapshotUuid,
            StoreSummary,
        },
    },
};

const CREATE_SNAPSHOT_SQL: &str = include_str!("sql/create_snapshot.sql");
const CREATE_SNAPSHOT_PHOTOS_SQL: &str = include_str!("sql/create_snapshot_photos.sql");
const GET_SNAPSHOTS_SQL: &str = include_str!("sql/get_snapshots.sql");
const GET_SNAPSHOT_PHOTOS_SQL: &str = include_str!("sql/get_snapshot_photos.sql");

struct SnapshotPhotoRow {
    snapshot_uuid: SnapshotUuid,
    photo: SnapshotPhoto,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSnapshotsRepository;

impl PgSnapshotsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Persist a captured snapshot and its photo copies inside `tx`.
    pub(crate) async fn create_snapshot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        snapshot: &NewSnapshot,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SNAPSHOT_SQL)
            .bind(snapshot.uuid.into_uuid())
            .bind(snapshot.product_uuid.into_uuid())
            .bind(snapshot.store_uuid.into_uuid())
            .bind(snapshot.category_uuid.into_uuid())
            .bind(&snapshot.name)
            .bind(&snapshot.slug)
            .bind(amount_to_i64(snapshot.reseller_price, "reseller_price")?)
            .bind(amount_to_i64(snapshot.consumer_price, "consumer_price")?)
            .bind(&snapshot.description)
            .execute(&mut **tx)
            .await?;

        if snapshot.photos.is_empty() {
            return Ok(());
        }

        let mut uuids = Vec::with_capacity(snapshot.photos.len());
        let mut urls = Vec::with_capacity(snapshot.photos.len());
        let mut positions = Vec::with_capacity(snapshot.photos.len());

        for photo in &snapshot.photos {
            uuids.push(photo.uuid.into_uuid());
            urls.push(photo.url.as_str());
            positions.push(position_to_i32(photo.position, "position")?);
        }

        query(CREATE_SNAPSHOT_PHOTOS_SQL)
            .bind(snapshot.uuid.into_uuid())
            .bind(uuids)
            .bind(urls)
            .bind(positions)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Load snapshots with their store, category and photos.
    ///
    /// Always two queries regardless of how many snapshots are requested.
    pub(crate) async fn get_snapshots(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        snapshots: &[SnapshotUuid],
    ) -> Result<FxHashMap<SnapshotUuid, SnapshotRecord>, sqlx::Error> {
        if snapshots.is_empty() {
            return Ok(FxHashMap::default());
        }

        let uuids: Vec<Uuid> = snapshots.iter().map(|uuid| uuid.into_uuid()).collect();

        let records = query_as::<Postgres, SnapshotRecord>(GET_SNAPSHOTS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let photos = query_as::<Postgres, SnapshotPhotoRow>(GET_SNAPSHOT_PHOTOS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_uuid: FxHashMap<SnapshotUuid, SnapshotRecord> = records
            .into_iter()
            .map(|record| (record.uuid, record))
            .collect();

        for row in photos {
            if let Some(record) = by_uuid.get_mut(&row.snapshot_uuid) {
                record.photos.push(row.photo);
            }
        }

        Ok(by_uuid)
    }
}

impl<'r> FromRow<'r, PgRow> for SnapshotRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SnapshotUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            reseller_price: try_get_amount(row, "reseller_price")?,
            consumer_price: try_get_amount(row, "consumer_price")?,
            description: row.try_get("description")?,
            store: StoreSummary {
                uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
                name: row.try_get("store_name")?,
                photo_url: row.try_get("store_photo_url")?,
            },
            category: CategorySummary {
                uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
                name: row.try_get("category_name")?,
            },
            photos: SmallVec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SnapshotPhotoRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            snapshot_uuid: SnapshotUuid::from_uuid(row.try_get("snapshot_uuid")?),
            photo: SnapshotPhoto {
                uuid: SnapshotPhotoUuid::from_uuid(row.try_get("uuid")?),
                url: row.try_get("url")?,
                position: try_get_position(row, "position")?,
            },
        })
    }
}
