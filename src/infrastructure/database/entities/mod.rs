//! MongoDB document shapes
//!
//! Field names follow the stored documents (`_id`, `createdAt`, `contactEmail`, ...),
//! which differ from the domain structs; conversion lives next to each entity.

pub mod job;
pub mod user;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;

pub use job::{CompanyEntity, JobEntity};
pub use user::UserEntity;

pub(crate) fn to_bson_datetime(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

pub(crate) fn from_bson_datetime(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

/// Calendar dates are stored as midnight UTC.
pub(crate) fn date_to_bson(date: NaiveDate) -> BsonDateTime {
    to_bson_datetime(date.and_time(NaiveTime::default()).and_utc())
}

pub(crate) fn date_from_bson(dt: BsonDateTime) -> NaiveDate {
    from_bson_datetime(dt).date_naive()
}
