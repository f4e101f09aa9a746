//! CareBridge — the coordination engine behind doctor, patient and
//! pharmacy dashboards.
//!
//! The core flow is one-way: uploaded document → extracted text →
//! parsed medicine templates → smart reminders → resolution events →
//! adherence aggregates → clinician alerts. Every stage persists its
//! output through the typed repositories in [`db`]; nothing is
//! transactional across stages.

pub mod adherence;
pub mod ai;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod export;
pub mod labs;
pub mod models;
pub mod pipeline;
pub mod prescriptions;
pub mod reminders;
pub mod session;
pub mod vitals;

pub use error::CareError;
pub use session::CareSession;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedding applications.
/// Honors `RUST_LOG`, falling back to the crate-level default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("CareBridge starting v{}", config::APP_VERSION);
}
