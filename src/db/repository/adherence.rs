use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DATETIME_FORMAT;
use crate::db::DatabaseError;
use crate::models::{AdherenceEvent, AdherenceSummary};

/// Append one resolution event to the log.
pub fn append_event(conn: &Connection, event: &AdherenceEvent) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO adherence_events (id, patient_id, medicine_name, taken, reminder_id, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            event.id.to_string(),
            event.patient_id.to_string(),
            event.medicine_name,
            event.taken as i32,
            event.reminder_id.to_string(),
            event.recorded_at.format(DATETIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

/// Full event history for a patient, oldest first.
pub fn get_events(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<AdherenceEvent>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, medicine_name, taken, reminder_id, recorded_at
         FROM adherence_events
         WHERE patient_id = ?1
         ORDER BY recorded_at ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_event)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Missed-dose count within a window (`since` inclusive).
pub fn missed_count_since(
    conn: &Connection,
    patient_id: &Uuid,
    since: &NaiveDateTime,
) -> Result<u32, DatabaseError> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM adherence_events
         WHERE patient_id = ?1 AND taken = 0 AND recorded_at >= ?2",
        params![
            patient_id.to_string(),
            since.format(DATETIME_FORMAT).to_string()
        ],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Aggregate the full history into an `AdherenceSummary`.
///
/// `rate` is `None` when no events exist; empty history is reported as
/// insufficient data rather than a placeholder percentage.
pub fn summarize(conn: &Connection, patient_id: &Uuid) -> Result<AdherenceSummary, DatabaseError> {
    let (total, taken): (u32, u32) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(taken), 0) FROM adherence_events WHERE patient_id = ?1",
        params![patient_id.to_string()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let rate = if total == 0 {
        None
    } else {
        Some((f64::from(taken) / f64::from(total) * 100.0).round() as u8)
    };

    Ok(AdherenceSummary {
        total,
        taken,
        missed: total - taken,
        rate,
    })
}

/// Bulk clear — removes the patient's adherence history (part of the
/// reminder Clear All action).
pub fn clear_events(conn: &Connection, patient_id: &Uuid) -> Result<usize, DatabaseError> {
    let affected = conn.execute(
        "DELETE FROM adherence_events WHERE patient_id = ?1",
        params![patient_id.to_string()],
    )?;
    Ok(affected)
}

fn row_to_event(row: &rusqlite::Row) -> Result<AdherenceEvent, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let patient_str: String = row.get(1)?;
    let taken: i32 = row.get(3)?;
    let reminder_str: String = row.get(4)?;
    let recorded_str: String = row.get(5)?;

    Ok(AdherenceEvent {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        patient_id: Uuid::parse_str(&patient_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        medicine_name: row.get(2)?,
        taken: taken != 0,
        reminder_id: Uuid::parse_str(&reminder_str).unwrap_or_default(),
        recorded_at: NaiveDateTime::parse_from_str(&recorded_str, DATETIME_FORMAT)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::patient::insert_patient;
    use crate::db::sqlite::open_memory_database;
    use crate::models::Patient;

    fn seeded_conn() -> (Connection, Uuid) {
        let conn = open_memory_database().unwrap();
        let patient = Patient {
            id: Uuid::new_v4(),
            name: "Test Patient".into(),
            age: 61,
            registered_at: chrono::Local::now().naive_local(),
        };
        insert_patient(&conn, &patient).unwrap();
        (conn, patient.id)
    }

    fn make_event(patient_id: Uuid, taken: bool, recorded_at: NaiveDateTime) -> AdherenceEvent {
        AdherenceEvent {
            id: Uuid::new_v4(),
            patient_id,
            medicine_name: "Metformin".into(),
            taken,
            reminder_id: Uuid::new_v4(),
            recorded_at,
        }
    }

    #[test]
    fn summary_rounds_percentage() {
        let (conn, patient_id) = seeded_conn();
        let now = chrono::Local::now().naive_local();
        // 2 taken out of 3 => 66.67 => 67
        append_event(&conn, &make_event(patient_id, true, now)).unwrap();
        append_event(&conn, &make_event(patient_id, true, now)).unwrap();
        append_event(&conn, &make_event(patient_id, false, now)).unwrap();

        let summary = summarize(&conn, &patient_id).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.taken, 2);
        assert_eq!(summary.missed, 1);
        assert_eq!(summary.rate, Some(67));
    }

    #[test]
    fn empty_history_has_no_rate() {
        let (conn, patient_id) = seeded_conn();
        let summary = summarize(&conn, &patient_id).unwrap();
        assert_eq!(
            summary,
            AdherenceSummary {
                total: 0,
                taken: 0,
                missed: 0,
                rate: None
            }
        );
    }

    #[test]
    fn missed_count_respects_window() {
        let (conn, patient_id) = seeded_conn();
        let now = chrono::Local::now().naive_local();
        let old = now - chrono::Duration::hours(30);
        append_event(&conn, &make_event(patient_id, false, old)).unwrap();
        append_event(&conn, &make_event(patient_id, false, now)).unwrap();
        append_event(&conn, &make_event(patient_id, true, now)).unwrap();

        let since = now - chrono::Duration::hours(24);
        assert_eq!(missed_count_since(&conn, &patient_id, &since).unwrap(), 1);
    }

    #[test]
    fn clear_wipes_history() {
        let (conn, patient_id) = seeded_conn();
        let now = chrono::Local::now().naive_local();
        append_event(&conn, &make_event(patient_id, true, now)).unwrap();
        append_event(&conn, &make_event(patient_id, false, now)).unwrap();

        assert_eq!(clear_events(&conn, &patient_id).unwrap(), 2);
        assert!(get_events(&conn, &patient_id).unwrap().is_empty());
    }
}
