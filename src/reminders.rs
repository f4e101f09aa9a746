//! Smart reminder generation — parsed medicine templates to persistent
//! reminder records for a patient.

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{self, clear_events, clear_reminders};
use crate::error::CareError;
use crate::models::enums::ReminderStatus;
use crate::models::{MedicineEntry, Reminder};
use crate::session::CareSession;

/// Expand templates into pending reminders for the session's patient
/// and persist the batch (merged with the existing set).
pub fn generate_reminders(
    conn: &Connection,
    session: &CareSession,
    templates: &[MedicineEntry],
) -> Result<Vec<Reminder>, CareError> {
    let now = chrono::Local::now().naive_local();

    let reminders: Vec<Reminder> = templates
        .iter()
        .map(|template| Reminder {
            id: Uuid::new_v4(),
            patient_id: session.patient_id(),
            medicine_name: template.name.clone(),
            dosage: template.dosage.clone(),
            timing: template.timing.clone(),
            frequency: template.frequency.clone(),
            instructions: template.instructions.clone(),
            status: ReminderStatus::Pending,
            created_at: now,
        })
        .collect();

    repository::insert_reminders(conn, &reminders)?;

    tracing::info!(
        patient_id = %session.patient_id(),
        count = reminders.len(),
        "smart reminders created"
    );

    Ok(reminders)
}

/// The patient's current reminder set.
pub fn list_reminders(
    conn: &Connection,
    session: &CareSession,
) -> Result<Vec<Reminder>, CareError> {
    Ok(repository::get_reminders(conn, &session.patient_id())?)
}

/// Clear All: removes the patient's whole reminder collection and the
/// adherence history derived from it. The only way reminders go away.
pub fn clear_all_reminders(conn: &Connection, session: &CareSession) -> Result<usize, CareError> {
    let patient_id = session.patient_id();
    let removed = clear_reminders(conn, &patient_id)?;
    let events = clear_events(conn, &patient_id)?;
    tracing::info!(patient_id = %patient_id, removed, events, "reminders cleared");
    Ok(removed)
}
