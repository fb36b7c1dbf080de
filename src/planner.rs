//! Reminder trigger planning.
//!
//! Translates a medication's dose time plus a lead-time offset into a daily
//! recurring fire time and a collision-resistant identifier, and drives
//! create/cancel against the injected [`NotificationPort`]. Registration is
//! best-effort: failures are logged and never surfaced to the caller, because
//! reminders are subordinate to the medication record being saved.

use chrono::{Duration, NaiveTime, Timelike};
use uuid::Uuid;

use crate::models::{LeadTime, Medication};
use crate::notify::{NotificationPort, ReminderPayload};

/// Daily wall-clock fire time for a reminder: the dose time minus the lead
/// offset, wrapping across midnight (00:05 with a 30-minute lead fires at
/// 23:35). The trigger recurs every day at a fixed hour:minute, so the date
/// component is irrelevant; only the time-of-day wraps.
pub fn compute_trigger_time(time_of_day: NaiveTime, lead: LeadTime) -> NaiveTime {
    let (fire_at, _wrapped) = time_of_day.overflowing_sub_signed(Duration::minutes(lead.minutes()));
    fire_at.with_second(0).unwrap_or(fire_at)
}

/// Deterministic trigger identifier: `<medicationId>_<medicationName>_<leadMinutes>`.
///
/// Re-registering the same logical reminder produces the same identifier, so
/// the collaborator replaces rather than duplicates; prefixing with the
/// medication id lets [`ReminderPlanner::cancel_all`] match every trigger of
/// one medication.
pub fn trigger_identifier(medication_id: &Uuid, medication_name: &str, lead: LeadTime) -> String {
    format!("{medication_id}_{medication_name}_{}", lead.minutes())
}

pub struct ReminderPlanner {
    notifier: Box<dyn NotificationPort>,
}

impl ReminderPlanner {
    pub fn new(notifier: Box<dyn NotificationPort>) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &dyn NotificationPort {
        self.notifier.as_ref()
    }

    /// Register one recurring daily trigger per lead time.
    ///
    /// No-ops silently when permission is not granted; the condition is only
    /// discoverable through `list_pending`. Individual registration failures
    /// are logged and do not stop the remaining lead times.
    pub fn schedule(&self, medication: &Medication, lead_times: &[LeadTime]) {
        if !self.notifier.request_permission() {
            tracing::debug!(
                medication_id = %medication.id,
                "Notification permission not granted, skipping trigger registration"
            );
            return;
        }

        for &lead in lead_times {
            let fire_at = compute_trigger_time(medication.dose_time, lead);
            let identifier = trigger_identifier(&medication.id, &medication.name, lead);
            let payload = ReminderPayload {
                medication_id: medication.id,
                title: "Medication reminder".to_string(),
                body: format!("{} is due soon", medication.name),
            };

            match self.notifier.register_daily_trigger(
                &identifier,
                fire_at.hour(),
                fire_at.minute(),
                payload,
            ) {
                Ok(()) => tracing::info!(%identifier, "Registered reminder trigger"),
                Err(e) => {
                    tracing::warn!(%identifier, error = %e, "Failed to register reminder trigger")
                }
            }
        }
    }

    /// Cancel every pending trigger whose identifier references this
    /// medication. Zero matches and collaborator failures are tolerated.
    pub fn cancel_all(&self, medication_id: &Uuid) {
        if let Err(e) = self.notifier.cancel(&medication_id.to_string()) {
            tracing::warn!(
                medication_id = %medication_id,
                error = %e,
                "Failed to cancel reminder triggers"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::notify::InMemoryNotifier;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_medication(name: &str, dose_time: NaiveTime) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            name: name.to_string(),
            dose_amount: 1.0,
            dose_unit: "unit".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end_date: None,
            notes: None,
            dose_time,
        }
    }

    #[test]
    fn trigger_time_without_wraparound() {
        assert_eq!(
            compute_trigger_time(time(9, 0), LeadTime::TenMinutes),
            time(8, 50)
        );
    }

    #[test]
    fn trigger_time_wraps_across_midnight() {
        assert_eq!(
            compute_trigger_time(time(0, 5), LeadTime::ThirtyMinutes),
            time(23, 35)
        );
    }

    #[test]
    fn trigger_time_one_hour_lead() {
        assert_eq!(
            compute_trigger_time(time(0, 30), LeadTime::OneHour),
            time(23, 30)
        );
    }

    #[test]
    fn identifier_is_deterministic() {
        let id = Uuid::new_v4();
        let a = trigger_identifier(&id, "Metformin", LeadTime::ThirtyMinutes);
        let b = trigger_identifier(&id, "Metformin", LeadTime::ThirtyMinutes);
        assert_eq!(a, b);
        assert_eq!(a, format!("{id}_Metformin_30"));
        assert!(a.starts_with(&id.to_string()));
    }

    #[test]
    fn schedule_registers_one_trigger_per_lead_time() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let planner = ReminderPlanner::new(Box::new(Arc::clone(&notifier)));
        let med = sample_medication("Metformin", time(8, 0));

        planner.schedule(&med, &[LeadTime::TenMinutes, LeadTime::OneHour]);

        let pending = notifier.list_pending();
        assert_eq!(pending.len(), 2);
        assert_eq!((pending[0].hour, pending[0].minute), (7, 50));
        assert_eq!((pending[1].hour, pending[1].minute), (7, 0));
        assert!(pending.iter().all(|t| t.payload.medication_id == med.id));
        assert!(pending[0].payload.body.contains("Metformin"));
    }

    #[test]
    fn rescheduling_replaces_rather_than_duplicates() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let planner = ReminderPlanner::new(Box::new(Arc::clone(&notifier)));
        let med = sample_medication("Metformin", time(8, 0));

        planner.schedule(&med, &[LeadTime::TenMinutes]);
        planner.schedule(&med, &[LeadTime::TenMinutes]);

        assert_eq!(notifier.list_pending().len(), 1);
    }

    #[test]
    fn schedule_noops_without_permission() {
        let notifier = Arc::new(InMemoryNotifier::denied());
        let planner = ReminderPlanner::new(Box::new(Arc::clone(&notifier)));
        let med = sample_medication("Metformin", time(8, 0));

        planner.schedule(&med, &[LeadTime::TenMinutes, LeadTime::ThirtyMinutes]);

        assert!(notifier.list_pending().is_empty());
    }

    #[test]
    fn cancel_all_removes_only_this_medication() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let planner = ReminderPlanner::new(Box::new(Arc::clone(&notifier)));
        let med_a = sample_medication("Metformin", time(8, 0));
        let med_b = sample_medication("Lisinopril", time(9, 0));

        planner.schedule(&med_a, &[LeadTime::TenMinutes, LeadTime::ThirtyMinutes]);
        planner.schedule(&med_b, &[LeadTime::TenMinutes]);

        planner.cancel_all(&med_a.id);

        let pending = notifier.list_pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].payload.medication_id, med_b.id);
    }

    #[test]
    fn cancel_all_with_nothing_pending_is_a_noop() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let planner = ReminderPlanner::new(Box::new(Arc::clone(&notifier)));
        planner.cancel_all(&Uuid::new_v4());
        assert!(notifier.list_pending().is_empty());
    }
}
