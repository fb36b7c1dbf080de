//! Repository layer — entity-scoped database operations.
//!
//! All functions take an explicit `&Connection`; nothing writes to the
//! store outside this module.

mod dose_occurrence;
mod medication;
mod reminder;

pub use dose_occurrence::*;
pub use medication::*;
pub use reminder::*;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use super::DatabaseError;

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn parse_uuid(field: &str, s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|_| DatabaseError::InvalidEnum {
        field: field.into(),
        value: s.into(),
    })
}

pub(crate) fn parse_date(field: &str, s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|_| DatabaseError::InvalidEnum {
        field: field.into(),
        value: s.into(),
    })
}

pub(crate) fn parse_time(field: &str, s: &str) -> Result<NaiveTime, DatabaseError> {
    NaiveTime::parse_from_str(s, TIME_FMT).map_err(|_| DatabaseError::InvalidEnum {
        field: field.into(),
        value: s.into(),
    })
}

pub(crate) fn parse_datetime(field: &str, s: &str) -> Result<NaiveDateTime, DatabaseError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).map_err(|_| DatabaseError::InvalidEnum {
        field: field.into(),
        value: s.into(),
    })
}

pub(crate) fn format_time(t: &NaiveTime) -> String {
    t.format(TIME_FMT).to_string()
}

pub(crate) fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}
