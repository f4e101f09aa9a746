use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DATETIME_FORMAT;
use crate::db::DatabaseError;
use crate::models::AnalysisReport;

pub fn insert_report(conn: &Connection, report: &AnalysisReport) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO analysis_reports (id, patient_id, patient_name, analysis_text,
         created_at, reviewed, reviewed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            report.id.to_string(),
            report.patient_id.to_string(),
            report.patient_name,
            report.analysis_text,
            report.created_at.format(DATETIME_FORMAT).to_string(),
            report.reviewed as i32,
            report
                .reviewed_at
                .map(|t| t.format(DATETIME_FORMAT).to_string()),
        ],
    )?;
    Ok(())
}

/// The doctor's pending review queue, newest first.
pub fn get_unreviewed_reports(conn: &Connection) -> Result<Vec<AnalysisReport>, DatabaseError> {
    reports_where(conn, "reviewed = 0")
}

/// Previously reviewed reports, newest first.
pub fn get_reviewed_reports(conn: &Connection) -> Result<Vec<AnalysisReport>, DatabaseError> {
    reports_where(conn, "reviewed = 1")
}

/// Mark a report reviewed. The reviewed flag is the report's only
/// mutation; a report can be reviewed once.
pub fn mark_report_reviewed(
    conn: &Connection,
    id: &Uuid,
    reviewed_at: &NaiveDateTime,
) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE analysis_reports SET reviewed = 1, reviewed_at = ?1
         WHERE id = ?2 AND reviewed = 0",
        params![
            reviewed_at.format(DATETIME_FORMAT).to_string(),
            id.to_string()
        ],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "analysis_report".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

fn reports_where(
    conn: &Connection,
    predicate: &str,
) -> Result<Vec<AnalysisReport>, DatabaseError> {
    let sql = format!(
        "SELECT id, patient_id, patient_name, analysis_text, created_at, reviewed, reviewed_at
         FROM analysis_reports
         WHERE {predicate}
         ORDER BY created_at DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_report)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

fn row_to_report(row: &rusqlite::Row) -> Result<AnalysisReport, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let patient_str: String = row.get(1)?;
    let created_str: String = row.get(4)?;
    let reviewed: i32 = row.get(5)?;
    let reviewed_at_str: Option<String> = row.get(6)?;

    Ok(AnalysisReport {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        patient_id: Uuid::parse_str(&patient_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        patient_name: row.get(2)?,
        analysis_text: row.get(3)?,
        created_at: NaiveDateTime::parse_from_str(&created_str, DATETIME_FORMAT)
            .unwrap_or_default(),
        reviewed: reviewed != 0,
        reviewed_at: reviewed_at_str
            .and_then(|s| NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).ok()),
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
            age: 47,
            registered_at: chrono::Local::now().naive_local(),
        };
        insert_patient(&conn, &patient).unwrap();
        (conn, patient.id)
    }

    fn make_report(patient_id: Uuid) -> AnalysisReport {
        AnalysisReport {
            id: Uuid::new_v4(),
            patient_id,
            patient_name: "Test Patient".into(),
            analysis_text: "Main findings: glucose elevated. Urgency: Medium.".into(),
            created_at: chrono::Local::now().naive_local(),
            reviewed: false,
            reviewed_at: None,
        }
    }

    #[test]
    fn new_report_lands_in_unreviewed_queue() {
        let (conn, patient_id) = seeded_conn();
        insert_report(&conn, &make_report(patient_id)).unwrap();

        assert_eq!(get_unreviewed_reports(&conn).unwrap().len(), 1);
        assert!(get_reviewed_reports(&conn).unwrap().is_empty());
    }

    #[test]
    fn review_moves_report_between_queues() {
        let (conn, patient_id) = seeded_conn();
        let report = make_report(patient_id);
        insert_report(&conn, &report).unwrap();

        let now = chrono::Local::now().naive_local();
        mark_report_reviewed(&conn, &report.id, &now).unwrap();

        assert!(get_unreviewed_reports(&conn).unwrap().is_empty());
        let reviewed = get_reviewed_reports(&conn).unwrap();
        assert_eq!(reviewed.len(), 1);
        assert!(reviewed[0].reviewed);
        assert!(reviewed[0].reviewed_at.is_some());
    }

    #[test]
    fn second_review_is_rejected() {
        let (conn, patient_id) = seeded_conn();
        let report = make_report(patient_id);
        insert_report(&conn, &report).unwrap();

        let now = chrono::Local::now().naive_local();
        mark_report_reviewed(&conn, &report.id, &now).unwrap();
        let result = mark_report_reviewed(&conn, &report.id, &now);
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
