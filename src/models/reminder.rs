use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::LeadTime;

/// A configured lead-time offset producing one daily notification trigger
/// for a medication. A medication may carry several, each with an
/// independent lead time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub medication_id: Uuid,
    pub time_of_day: NaiveTime,
    pub lead_time: LeadTime,
    pub active: bool,
}
