use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a medication's dose was taken on a specific calendar day.
///
/// Identity is (medication_id, day); at most one record exists per key.
/// `recorded_dose` snapshots the medication's dose amount at creation so
/// later edits to the medication cannot rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseOccurrence {
    pub id: Uuid,
    pub medication_id: Uuid,
    pub day: NaiveDate,
    pub scheduled_at: NaiveDateTime,
    pub taken: bool,
    pub recorded_dose: f64,
}
