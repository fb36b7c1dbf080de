//! Dosetime — medication-reminder scheduling.
//!
//! Users register medications with dosage, a daily dose time, and an
//! inclusive date range; the library computes which days each medication is
//! active, derives daily reminder triggers with a lead-time offset, and
//! tracks whether each day's dose was taken.
//!
//! Persistence is a local SQLite store; notification delivery goes through
//! the injected [`notify::NotificationPort`] so no vendor SDK leaks into the
//! core.

pub mod calendar;
pub mod config;
pub mod db;
pub mod dose_log;
pub mod models;
pub mod notify;
pub mod planner;
pub mod schedule;
pub mod service;
pub mod settings;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding the library.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
