use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DATETIME_FORMAT;
use crate::db::DatabaseError;
use crate::models::enums::VitalsSource;
use crate::models::VitalsReading;

pub fn insert_reading(conn: &Connection, reading: &VitalsReading) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO vitals_readings (id, patient_id, heart_rate, oxygen_saturation,
         steps, weight, source, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            reading.id.to_string(),
            reading.patient_id.to_string(),
            reading.heart_rate,
            reading.oxygen_saturation,
            reading.steps,
            reading.weight,
            reading.source.as_str(),
            reading.recorded_at.format(DATETIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

/// The most recent `limit` readings for a patient, newest first.
pub fn recent_readings(
    conn: &Connection,
    patient_id: &Uuid,
    limit: u32,
) -> Result<Vec<VitalsReading>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, heart_rate, oxygen_saturation, steps, weight, source, recorded_at
         FROM vitals_readings
         WHERE patient_id = ?1
         ORDER BY recorded_at DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string(), limit], row_to_reading)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// The single latest reading, if any.
pub fn latest_reading(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<VitalsReading>, DatabaseError> {
    let mut readings = recent_readings(conn, patient_id, 1)?;
    Ok(readings.pop())
}

fn row_to_reading(row: &rusqlite::Row) -> Result<VitalsReading, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let patient_str: String = row.get(1)?;
    let source_str: String = row.get(6)?;
    let recorded_str: String = row.get(7)?;

    Ok(VitalsReading {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        patient_id: Uuid::parse_str(&patient_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        heart_rate: row.get(2)?,
        oxygen_saturation: row.get(3)?,
        steps: row.get(4)?,
        weight: row.get(5)?,
        source: VitalsSource::from_str(&source_str).unwrap_or(VitalsSource::Manual),
        recorded_at: NaiveDateTime::parse_from_str(&recorded_str, DATETIME_FORMAT)
            .unwrap_or_default(),
    })
}
