use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DATETIME_FORMAT;
use crate::db::DatabaseError;
use crate::models::enums::{Frequency, ReminderStatus, ReminderTiming};
use crate::models::Reminder;

/// Outcome of a status transition attempt on a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderTransition {
    Applied,
    /// The reminder was already taken or missed; nothing changed.
    AlreadyResolved,
}

/// Insert a batch of reminders atomically (all or nothing).
pub fn insert_reminders(conn: &Connection, reminders: &[Reminder]) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO reminders (id, patient_id, medicine_name, dosage, timing, frequency,
             instructions, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for reminder in reminders {
            stmt.execute(params![
                reminder.id.to_string(),
                reminder.patient_id.to_string(),
                reminder.medicine_name,
                reminder.dosage,
                reminder.timing.as_str(),
                reminder.frequency.as_str(),
                reminder.instructions,
                reminder.status.as_str(),
                reminder.created_at.format(DATETIME_FORMAT).to_string(),
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// All reminders for a patient, oldest first (creation order).
pub fn get_reminders(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Reminder>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, medicine_name, dosage, timing, frequency, instructions,
                status, created_at
         FROM reminders
         WHERE patient_id = ?1
         ORDER BY created_at ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_reminder)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

pub fn get_reminder(conn: &Connection, id: &Uuid) -> Result<Reminder, DatabaseError> {
    conn.query_row(
        "SELECT id, patient_id, medicine_name, dosage, timing, frequency, instructions,
                status, created_at
         FROM reminders WHERE id = ?1",
        params![id.to_string()],
        row_to_reminder,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "reminder".into(),
            id: id.to_string(),
        },
        other => DatabaseError::Sqlite(other),
    })
}

/// Apply the single pending → taken|missed transition.
///
/// The UPDATE carries `status = 'pending'` so the transition is one
/// atomic compare-and-swap; a reminder that already resolved reports
/// `AlreadyResolved` without touching the row.
pub fn transition_reminder(
    conn: &Connection,
    id: &Uuid,
    new_status: &ReminderStatus,
) -> Result<ReminderTransition, DatabaseError> {
    debug_assert!(new_status.is_terminal());

    let affected = conn.execute(
        "UPDATE reminders SET status = ?1 WHERE id = ?2 AND status = 'pending'",
        params![new_status.as_str(), id.to_string()],
    )?;

    if affected == 1 {
        return Ok(ReminderTransition::Applied);
    }

    // Nothing updated: either the reminder is terminal or it never existed.
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM reminders WHERE id = ?1",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    if exists {
        Ok(ReminderTransition::AlreadyResolved)
    } else {
        Err(DatabaseError::NotFound {
            entity_type: "reminder".into(),
            id: id.to_string(),
        })
    }
}

/// Bulk clear — removes the patient's whole reminder collection.
/// Returns the number of rows removed.
pub fn clear_reminders(conn: &Connection, patient_id: &Uuid) -> Result<usize, DatabaseError> {
    let affected = conn.execute(
        "DELETE FROM reminders WHERE patient_id = ?1",
        params![patient_id.to_string()],
    )?;
    Ok(affected)
}

fn row_to_reminder(row: &rusqlite::Row) -> Result<Reminder, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let patient_str: String = row.get(1)?;
    let timing_str: String = row.get(4)?;
    let frequency_str: String = row.get(5)?;
    let status_str: String = row.get(7)?;
    let created_str: String = row.get(8)?;

    Ok(Reminder {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        patient_id: Uuid::parse_str(&patient_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        medicine_name: row.get(2)?,
        dosage: row.get(3)?,
        timing: ReminderTiming::from_str(&timing_str).unwrap_or(ReminderTiming::Morning),
        frequency: Frequency::from_str(&frequency_str).unwrap_or(Frequency::OnceDaily),
        instructions: row.get(6)?,
        status: ReminderStatus::from_str(&status_str).unwrap_or(ReminderStatus::Pending),
        created_at: NaiveDateTime::parse_from_str(&created_str, DATETIME_FORMAT)
            .unwrap_or_default(),
    })
}
