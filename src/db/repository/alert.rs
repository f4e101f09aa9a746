use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DATETIME_FORMAT;
use crate::db::DatabaseError;
use crate::models::enums::{AlertKind, AlertPriority};
use crate::models::DoctorAlert;

pub fn insert_alert(conn: &Connection, alert: &DoctorAlert) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctor_alerts (id, kind, priority, title, message, patient_id,
         created_at, active, action_required)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            alert.id.to_string(),
            alert.kind.as_str(),
            alert.priority.as_str(),
            alert.title,
            alert.message,
            alert.patient_id.to_string(),
            alert.created_at.format(DATETIME_FORMAT).to_string(),
            alert.active as i32,
            alert.action_required as i32,
        ],
    )?;
    Ok(())
}

/// Active alerts for one patient, newest first.
pub fn get_active_alerts(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<DoctorAlert>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, priority, title, message, patient_id, created_at, active, action_required
         FROM doctor_alerts
         WHERE patient_id = ?1 AND active = 1
         ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_alert)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// All active alerts across patients (the doctor dashboard feed).
pub fn list_active_alerts(conn: &Connection) -> Result<Vec<DoctorAlert>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, priority, title, message, patient_id, created_at, active, action_required
         FROM doctor_alerts
         WHERE active = 1
         ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([], row_to_alert)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Is there an active alert of this kind for the patient?
/// Drives the adherence no-duplicate-while-active policy.
pub fn has_active_alert(
    conn: &Connection,
    patient_id: &Uuid,
    kind: &AlertKind,
) -> Result<bool, DatabaseError> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM doctor_alerts
         WHERE patient_id = ?1 AND kind = ?2 AND active = 1",
        params![patient_id.to_string(), kind.as_str()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Deactivate an alert after clinician review. Alerts are never deleted.
pub fn deactivate_alert(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE doctor_alerts SET active = 0 WHERE id = ?1 AND active = 1",
        params![id.to_string()],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "doctor_alert".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

fn row_to_alert(row: &rusqlite::Row) -> Result<DoctorAlert, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let kind_str: String = row.get(1)?;
    let priority_str: String = row.get(2)?;
    let patient_str: String = row.get(5)?;
    let created_str: String = row.get(6)?;
    let active: i32 = row.get(7)?;
    let action_required: i32 = row.get(8)?;

    Ok(DoctorAlert {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        kind: AlertKind::from_str(&kind_str).unwrap_or(AlertKind::MissedDoses),
        priority: AlertPriority::from_str(&priority_str).unwrap_or(AlertPriority::Low),
        title: row.get(3)?,
        message: row.get(4)?,
        patient_id: Uuid::parse_str(&patient_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        created_at: NaiveDateTime::parse_from_str(&created_str, DATETIME_FORMAT)
            .unwrap_or_default(),
        active: active != 0,
        action_required: action_required != 0,
    })
}
