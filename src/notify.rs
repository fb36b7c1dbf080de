//! Notification capability boundary.
//!
//! The core never talks to a vendor SDK. It constructs deterministic trigger
//! identifiers and daily fire times, and hands them to a [`NotificationPort`]
//! implementation. Adapters own permission prompting and delivery;
//! [`InMemoryNotifier`] stands in for them in tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Trigger registration failed: {0}")]
    Registration(String),

    #[error("Trigger cancellation failed: {0}")]
    Cancellation(String),
}

/// Content delivered when a trigger fires. Serialisable so adapters can
/// forward it to a vendor pipeline as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub medication_id: Uuid,
    pub title: String,
    pub body: String,
}

impl ReminderPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Lifecycle of a registered trigger. Pending → Fired is owned entirely by
/// the platform notification layer and is never observed synchronously by
/// the core; it is modelled here for the in-memory fake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Unregistered,
    Pending,
    Fired,
    Cancelled,
}

/// A registered daily trigger as reported by the collaborator.
#[derive(Debug, Clone)]
pub struct TriggerRecord {
    pub identifier: String,
    pub hour: u32,
    pub minute: u32,
    pub payload: ReminderPayload,
    pub state: TriggerState,
}

/// Injected notification collaborator.
///
/// Registration returns promptly; delivery happens on the collaborator's own
/// pipeline. `cancel` matches by exact identifier or identifier prefix, which
/// is how all triggers of one medication are removed at once.
pub trait NotificationPort {
    /// Whether notification permission is currently granted. Adapters that
    /// need to prompt the user do so out of band; the core never prompts.
    fn request_permission(&self) -> bool;

    fn register_daily_trigger(
        &self,
        identifier: &str,
        hour: u32,
        minute: u32,
        payload: ReminderPayload,
    ) -> Result<(), NotificationError>;

    fn cancel(&self, id_or_prefix: &str) -> Result<(), NotificationError>;

    fn list_pending(&self) -> Vec<TriggerRecord>;
}

impl<N: NotificationPort + ?Sized> NotificationPort for Arc<N> {
    fn request_permission(&self) -> bool {
        (**self).request_permission()
    }

    fn register_daily_trigger(
        &self,
        identifier: &str,
        hour: u32,
        minute: u32,
        payload: ReminderPayload,
    ) -> Result<(), NotificationError> {
        (**self).register_daily_trigger(identifier, hour, minute, payload)
    }

    fn cancel(&self, id_or_prefix: &str) -> Result<(), NotificationError> {
        (**self).cancel(id_or_prefix)
    }

    fn list_pending(&self) -> Vec<TriggerRecord> {
        (**self).list_pending()
    }
}

/// In-memory [`NotificationPort`] with a controllable permission flag and a
/// `fire` hook, for tests and headless runs.
pub struct InMemoryNotifier {
    permission: AtomicBool,
    triggers: Mutex<Vec<TriggerRecord>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            permission: AtomicBool::new(true),
            triggers: Mutex::new(Vec::new()),
        }
    }

    /// A notifier whose permission has been denied.
    pub fn denied() -> Self {
        let notifier = Self::new();
        notifier.set_permission(false);
        notifier
    }

    pub fn set_permission(&self, granted: bool) {
        self.permission.store(granted, Ordering::SeqCst);
    }

    /// Simulate the platform firing a pending trigger.
    pub fn fire(&self, identifier: &str) {
        let mut triggers = self.triggers.lock().expect("notifier lock poisoned");
        for trigger in triggers.iter_mut() {
            if trigger.identifier == identifier && trigger.state == TriggerState::Pending {
                trigger.state = TriggerState::Fired;
            }
        }
    }

    /// Every trigger ever registered, including fired and cancelled ones.
    pub fn all_triggers(&self) -> Vec<TriggerRecord> {
        self.triggers.lock().expect("notifier lock poisoned").clone()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPort for InMemoryNotifier {
    fn request_permission(&self) -> bool {
        self.permission.load(Ordering::SeqCst)
    }

    fn register_daily_trigger(
        &self,
        identifier: &str,
        hour: u32,
        minute: u32,
        payload: ReminderPayload,
    ) -> Result<(), NotificationError> {
        let mut triggers = self.triggers.lock().expect("notifier lock poisoned");
        // Same identifier replaces: re-registering a logical reminder is
        // idempotent.
        triggers.retain(|t| t.identifier != identifier);
        triggers.push(TriggerRecord {
            identifier: identifier.to_string(),
            hour,
            minute,
            payload,
            state: TriggerState::Pending,
        });
        Ok(())
    }

    fn cancel(&self, id_or_prefix: &str) -> Result<(), NotificationError> {
        let mut triggers = self.triggers.lock().expect("notifier lock poisoned");
        for trigger in triggers.iter_mut() {
            if trigger.state == TriggerState::Pending
                && trigger.identifier.starts_with(id_or_prefix)
            {
                trigger.state = TriggerState::Cancelled;
            }
        }
        Ok(())
    }

    fn list_pending(&self) -> Vec<TriggerRecord> {
        self.triggers
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .filter(|t| t.state == TriggerState::Pending)
            .cloned()
            .collect()
    }
}
