use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DATETIME_FORMAT;
use crate::db::DatabaseError;
use crate::models::MedicineList;

pub fn insert_medicine_list(conn: &Connection, list: &MedicineList) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicine_lists (id, patient_id, doctor_name, content, prescribed, sent_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            list.id.to_string(),
            list.patient_id.to_string(),
            list.doctor_name,
            list.content,
            list.prescribed as i32,
            list.sent_at.format(DATETIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

/// All medicine lists for a patient, newest first.
pub fn get_medicine_lists(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<MedicineList>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_name, content, prescribed, sent_at
         FROM medicine_lists
         WHERE patient_id = ?1
         ORDER BY sent_at DESC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_medicine_list)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

fn row_to_medicine_list(row: &rusqlite::Row) -> Result<MedicineList, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let patient_str: String = row.get(1)?;
    let prescribed: i32 = row.get(4)?;
    let sent_str: String = row.get(5)?;

    Ok(MedicineList {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        patient_id: Uuid::parse_str(&patient_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        doctor_name: row.get(2)?,
        content: row.get(3)?,
        prescribed: prescribed != 0,
        sent_at: NaiveDateTime::parse_from_str(&sent_str, DATETIME_FORMAT).unwrap_or_default(),
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
            age: 30,
            registered_at: chrono::Local::now().naive_local(),
        };
        insert_patient(&conn, &patient).unwrap();
        (conn, patient.id)
    }

    fn make_list(patient_id: Uuid, content: &str, sent_at: NaiveDateTime) -> MedicineList {
        MedicineList {
            id: Uuid::new_v4(),
            patient_id,
            doctor_name: "Dr. Okafor".into(),
            content: content.into(),
            prescribed: true,
            sent_at,
        }
    }

    #[test]
    fn insert_and_list_newest_first() {
        let (conn, patient_id) = seeded_conn();
        let base = chrono::Local::now().naive_local();
        insert_medicine_list(&conn, &make_list(patient_id, "old list", base)).unwrap();
        insert_medicine_list(
            &conn,
            &make_list(patient_id, "new list", base + chrono::Duration::hours(1)),
        )
        .unwrap();

        let lists = get_medicine_lists(&conn, &patient_id).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].content, "new list");
    }

    #[test]
    fn lists_isolated_per_patient() {
        let (conn, patient_id) = seeded_conn();
        insert_medicine_list(
            &conn,
            &make_list(patient_id, "mine", chrono::Local::now().naive_local()),
        )
        .unwrap();

        let other = Uuid::new_v4();
        let lists = get_medicine_lists(&conn, &other).unwrap();
        assert!(lists.is_empty());
    }

    #[test]
    fn unknown_patient_rejected_by_fk() {
        let conn = open_memory_database().unwrap();
        let result = insert_medicine_list(
            &conn,
            &make_list(Uuid::new_v4(), "orphan", chrono::Local::now().naive_local()),
        );
        assert!(result.is_err());
    }
}
