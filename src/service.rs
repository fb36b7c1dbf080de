//! Medication lifecycle orchestration: the add/delete flows the UI drives,
//! tying validation, persistence, reminder planning, and the dose log
//! together over one store connection.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::db::repository::{
    delete_medication, insert_medication, insert_reminder, list_medications,
    occurrences_for_medication,
};
use crate::db::DatabaseError;
use crate::dose_log::{filter_for_date, DoseLog};
use crate::models::{DoseOccurrence, LeadTime, Medication, Reminder};
use crate::notify::NotificationPort;
use crate::planner::ReminderPlanner;

/// Fallback when the dose amount input is missing or unparseable.
/// Preserved permissive policy: such input is recovered, not rejected.
const DEFAULT_DOSE_AMOUNT: f64 = 1.0;

/// Sentinel unit when none was entered.
const DEFAULT_DOSE_UNIT: &str = "unit";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Medication name is required")]
    MissingName,

    #[error("End date {end} precedes start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Raw add-medication form input. `dose_amount` is the unparsed text field.
#[derive(Debug, Clone)]
pub struct NewMedication {
    pub name: String,
    pub dose_amount: String,
    pub dose_unit: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub dose_time: NaiveTime,
    pub lead_times: Vec<LeadTime>,
}

pub struct MedicationService {
    conn: Connection,
    planner: ReminderPlanner,
    dose_log: DoseLog,
}

impl MedicationService {
    pub fn new(conn: Connection, notifier: Box<dyn NotificationPort>) -> Self {
        Self {
            conn,
            planner: ReminderPlanner::new(notifier),
            dose_log: DoseLog::new(),
        }
    }

    pub fn open(
        path: &std::path::Path,
        notifier: Box<dyn NotificationPort>,
    ) -> Result<Self, DatabaseError> {
        let conn = crate::db::sqlite::open_database(path)?;
        Ok(Self::new(conn, notifier))
    }

    pub fn dose_log(&self) -> &DoseLog {
        &self.dose_log
    }

    /// Validate and persist a medication, its reminders, and the start-day
    /// occurrence in one transaction, then register reminder triggers.
    ///
    /// Validation fails fast: nothing is written on a rejected input.
    /// Trigger registration is best-effort and never rolls persistence back.
    pub fn add_medication(&mut self, input: NewMedication) -> Result<Medication, ServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ServiceError::MissingName);
        }
        if let Some(end) = input.end_date {
            if end < input.start_date {
                return Err(ServiceError::EndBeforeStart {
                    start: input.start_date,
                    end,
                });
            }
        }

        let dose_amount = parse_dose_amount(&input.dose_amount);
        let unit = input.dose_unit.trim();
        let dose_unit = if unit.is_empty() {
            DEFAULT_DOSE_UNIT.to_string()
        } else {
            unit.to_string()
        };
        let dose_time = input.dose_time.with_second(0).unwrap_or(input.dose_time);

        let medication = Medication {
            id: Uuid::new_v4(),
            name: name.to_string(),
            dose_amount,
            dose_unit,
            start_date: input.start_date,
            end_date: input.end_date,
            notes: input.notes.clone(),
            dose_time,
        };

        let tx = self.conn.transaction().map_err(DatabaseError::from)?;
        insert_medication(&tx, &medication)?;
        for &lead in &input.lead_times {
            let reminder = Reminder {
                id: Uuid::new_v4(),
                medication_id: medication.id,
                time_of_day: dose_time,
                lead_time: lead,
                active: true,
            };
            insert_reminder(&tx, &reminder)?;
        }
        self.dose_log
            .get_or_create(&tx, &medication, medication.start_date)?;
        tx.commit().map_err(DatabaseError::from)?;

        self.planner.schedule(&medication, &input.lead_times);

        tracing::info!(medication_id = %medication.id, "Added medication");
        Ok(medication)
    }

    /// Cancel all reminder triggers for the medication, then delete it;
    /// reminders and dose occurrences cascade.
    pub fn delete_medication(&mut self, medication_id: &Uuid) -> Result<(), ServiceError> {
        self.planner.cancel_all(medication_id);

        let tx = self.conn.transaction().map_err(DatabaseError::from)?;
        delete_medication(&tx, medication_id)?;
        tx.commit().map_err(DatabaseError::from)?;

        tracing::info!(medication_id = %medication_id, "Deleted medication");
        Ok(())
    }

    /// Medications whose active window covers `day`, creation order.
    pub fn medications_for_date(&self, day: NaiveDate) -> Result<Vec<Medication>, DatabaseError> {
        let all = list_medications(&self.conn)?;
        Ok(filter_for_date(&all, day).into_iter().cloned().collect())
    }

    /// The day's dose record for a medication, created on first access.
    pub fn occurrence_for(
        &self,
        medication: &Medication,
        day: NaiveDate,
    ) -> Result<DoseOccurrence, DatabaseError> {
        self.dose_log.get_or_create(&self.conn, medication, day)
    }

    pub fn toggle_taken(
        &self,
        occurrence: &DoseOccurrence,
    ) -> Result<DoseOccurrence, DatabaseError> {
        self.dose_log.toggle_taken(&self.conn, occurrence)
    }

    /// Full dose history for a medication, oldest first.
    pub fn dose_history(&self, medication_id: &Uuid) -> Result<Vec<DoseOccurrence>, DatabaseError> {
        occurrences_for_medication(&self.conn, medication_id)
    }
}

fn parse_dose_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value >= 0.0 => value,
        _ => {
            tracing::warn!(input = raw, "Unusable dose amount, recording default");
            DEFAULT_DOSE_AMOUNT
        }
    }
}
