//! Adherence recording — reminder resolutions, the rolling missed-dose
//! rule, and history aggregation.

use chrono::Duration;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{
    append_event, get_reminder, has_active_alert, insert_alert, missed_count_since,
    transition_reminder, ReminderTransition,
};
use crate::db::{repository, DatabaseError};
use crate::error::CareError;
use crate::models::enums::{AlertKind, AlertPriority, ReminderStatus};
use crate::models::{AdherenceEvent, AdherenceSummary, DoctorAlert};
use crate::session::CareSession;

/// Missed doses within the window that trip the clinician alert.
pub const MISSED_DOSE_THRESHOLD: u32 = 3;

/// Rolling window for the missed-dose rule.
pub const MISSED_DOSE_WINDOW_HOURS: i64 = 24;

/// Outcome of resolving one reminder.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub event: AdherenceEvent,
    /// Set when this resolution tripped the missed-dose rule.
    pub alert: Option<DoctorAlert>,
}

/// Resolve a reminder as taken or missed.
///
/// The pending → taken|missed transition happens exactly once; a second
/// call on the same reminder fails with `AlreadyResolved` and appends
/// no event, so aggregates cannot double-count.
pub fn resolve(
    conn: &Connection,
    session: &CareSession,
    reminder_id: &Uuid,
    taken: bool,
) -> Result<Resolution, CareError> {
    let reminder = get_reminder(conn, reminder_id)?;
    if reminder.patient_id != session.patient_id() {
        // Other patients' reminders are invisible to this session.
        return Err(CareError::Database(DatabaseError::NotFound {
            entity_type: "reminder".into(),
            id: reminder_id.to_string(),
        }));
    }

    let new_status = if taken {
        ReminderStatus::Taken
    } else {
        ReminderStatus::Missed
    };

    match transition_reminder(conn, reminder_id, &new_status)? {
        ReminderTransition::Applied => {}
        ReminderTransition::AlreadyResolved => {
            return Err(CareError::AlreadyResolved { id: *reminder_id });
        }
    }

    let event = AdherenceEvent {
        id: Uuid::new_v4(),
        patient_id: session.patient_id(),
        medicine_name: reminder.medicine_name,
        taken,
        reminder_id: *reminder_id,
        recorded_at: chrono::Local::now().naive_local(),
    };
    append_event(conn, &event)?;

    tracing::info!(
        patient_id = %event.patient_id,
        medicine = %event.medicine_name,
        taken,
        "reminder resolved"
    );

    let alert = if taken {
        None
    } else {
        check_missed_dose_rule(conn, &event)?
    };

    Ok(Resolution { event, alert })
}

/// The rolling 24-hour missed-dose rule.
///
/// Emits one high-priority alert when the count reaches the threshold.
/// While an active missed-doses alert exists for the patient, further
/// qualifying events add nothing; clinician review re-arms the rule.
fn check_missed_dose_rule(
    conn: &Connection,
    event: &AdherenceEvent,
) -> Result<Option<DoctorAlert>, CareError> {
    let since = event.recorded_at - Duration::hours(MISSED_DOSE_WINDOW_HOURS);
    let missed = missed_count_since(conn, &event.patient_id, &since)?;

    if missed < MISSED_DOSE_THRESHOLD {
        return Ok(None);
    }
    if has_active_alert(conn, &event.patient_id, &AlertKind::MissedDoses)? {
        return Ok(None);
    }

    let alert = DoctorAlert {
        id: Uuid::new_v4(),
        kind: AlertKind::MissedDoses,
        priority: AlertPriority::High,
        title: "Patient Medication Non-Adherence".into(),
        message: format!("Patient has missed {missed} medications in 24 hours"),
        patient_id: event.patient_id,
        created_at: event.recorded_at,
        active: true,
        action_required: false,
    };
    insert_alert(conn, &alert)?;

    tracing::warn!(
        patient_id = %event.patient_id,
        missed,
        "missed-dose threshold reached, doctor alerted"
    );

    Ok(Some(alert))
}

/// Adherence percentage over the patient's full history.
pub fn summarize(conn: &Connection, patient_id: &Uuid) -> Result<AdherenceSummary, CareError> {
    Ok(repository::summarize(conn, patient_id)?)
}
