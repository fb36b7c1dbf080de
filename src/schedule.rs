//! Activity-window and occurrence-instant math for one medication.
//!
//! Pure functions of (start date, end date, dose time); no store access.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::Medication;

/// One medication's dosing schedule: the inclusive date range it is
/// prescribed for plus the daily time-of-day the dose is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationSchedule {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    dose_time: NaiveTime,
}

impl MedicationSchedule {
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>, dose_time: NaiveTime) -> Self {
        Self {
            start_date,
            end_date,
            dose_time,
        }
    }

    pub fn for_medication(med: &Medication) -> Self {
        Self::new(med.start_date, med.end_date, med.dose_time)
    }

    /// Whether the medication should be offered for dosing on `date`.
    ///
    /// Inclusive on both ends at day granularity; an absent end date means
    /// active indefinitely.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }

    /// The concrete instant dosing is expected on `date`: the calendar day
    /// combined with the recorded time-of-day, seconds truncated to zero.
    /// Meaningful only for dates where [`is_active_on`](Self::is_active_on)
    /// holds.
    pub fn occurrence_instant(&self, date: NaiveDate) -> NaiveDateTime {
        let truncated = self.dose_time.with_second(0).unwrap_or(self.dose_time);
        date.and_time(truncated)
    }
}
