//! Per-day dose records: at most one [`DoseOccurrence`] per
//! (medication, calendar day), created lazily and toggled by the user.

use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{get_occurrence, insert_occurrence, set_occurrence_taken};
use crate::db::DatabaseError;
use crate::models::{DoseOccurrence, Medication};
use crate::schedule::MedicationSchedule;

/// Medications active on `day`, input order preserved.
pub fn filter_for_date(medications: &[Medication], day: NaiveDate) -> Vec<&Medication> {
    medications
        .iter()
        .filter(|med| MedicationSchedule::for_medication(med).is_active_on(day))
        .collect()
}

type ChangeListener = Box<dyn Fn() + Send>;

/// Dose-taken bookkeeping plus a global "dose log changed" signal the
/// presentation layer subscribes to for re-querying and re-rendering.
/// The signal carries no key; listeners refresh wholesale.
pub struct DoseLog {
    listeners: Mutex<Vec<ChangeListener>>,
}

impl DoseLog {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + Send + 'static) {
        self.listeners
            .lock()
            .expect("dose log lock poisoned")
            .push(Box::new(listener));
    }

    fn notify_changed(&self) {
        for listener in self.listeners.lock().expect("dose log lock poisoned").iter() {
            listener();
        }
    }

    /// The occurrence for (medication, day), creating it on first access.
    ///
    /// A fresh record starts untaken and snapshots the medication's current
    /// dose amount. Repeated calls return the same record; the UNIQUE
    /// (medication_id, day) index backs the lookup-then-create, so even a
    /// lost race resolves by re-fetching instead of duplicating.
    pub fn get_or_create(
        &self,
        conn: &Connection,
        medication: &Medication,
        day: NaiveDate,
    ) -> Result<DoseOccurrence, DatabaseError> {
        if let Some(existing) = get_occurrence(conn, &medication.id, day)? {
            return Ok(existing);
        }

        let occurrence = DoseOccurrence {
            id: Uuid::new_v4(),
            medication_id: medication.id,
            day,
            scheduled_at: MedicationSchedule::for_medication(medication).occurrence_instant(day),
            taken: false,
            recorded_dose: medication.dose_amount,
        };

        match insert_occurrence(conn, &occurrence) {
            Ok(()) => Ok(occurrence),
            Err(DatabaseError::Sqlite(e))
                if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) =>
            {
                get_occurrence(conn, &medication.id, day)?.ok_or(DatabaseError::NotFound {
                    entity_type: "DoseOccurrence".into(),
                    id: medication.id.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Flip the taken flag, persist, and fire the change signal.
    /// Toggling twice restores the original state.
    pub fn toggle_taken(
        &self,
        conn: &Connection,
        occurrence: &DoseOccurrence,
    ) -> Result<DoseOccurrence, DatabaseError> {
        let updated = DoseOccurrence {
            taken: !occurrence.taken,
            ..occurrence.clone()
        };
        set_occurrence_taken(conn, &updated.id, updated.taken)?;
        self.notify_changed();
        Ok(updated)
    }
}

impl Default for DoseLog {
    fn default() -> Self {
        Self::new()
    }
}
