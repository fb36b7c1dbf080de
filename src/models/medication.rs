use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked drug with dosage and an inclusive active date range.
///
/// `end_date` of `None` means the medication is ongoing. `dose_time` is the
/// daily time-of-day the dose is expected, timezone-naive with seconds
/// truncated to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dose_amount: f64,
    pub dose_unit: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub dose_time: NaiveTime,
}
