//! Column conversions shared by the Postgres repositories.
//!
//! Amounts, stock and quantities are unsigned in the domain but stored as
//! `BIGINT`; photo positions are stored as `INTEGER`.

use std::num::TryFromIntError;

use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_position(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let position_i32: i32 = row.try_get(col)?;

    u32::try_from(position_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn amount_to_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn position_to_i32<P>(position: P, col: &str) -> Result<i32, sqlx::Error>
where
    i32: TryFrom<P, Error = TryFromIntError>,
{
    i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
