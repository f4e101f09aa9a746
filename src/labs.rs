//! Lab report flow — extract report text, ask the model for insights,
//! and queue the analysis for clinician review.

use rusqlite::Connection;
use uuid::Uuid;

use crate::ai::{prompts, GenerativeClient};
use crate::db::repository::{get_patient, insert_report};
use crate::error::CareError;
use crate::models::AnalysisReport;
use crate::pipeline::extraction::{DocumentExtractor, UploadedFile};
use crate::session::CareSession;

/// Extract a lab report's text and normalize its whitespace.
pub fn extract_report_text(
    client: &dyn GenerativeClient,
    file: &UploadedFile,
) -> Result<String, CareError> {
    let extractor = DocumentExtractor::new(client);
    let outcome = extractor.extract(file, prompts::LAB_REPORT_IMAGE_PROMPT)?;

    // Collapse runs of whitespace; layout artifacts don't help the model.
    let clean = outcome.text.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(clean)
}

/// Ask the model for findings, abnormal values and urgency.
pub fn analyze_lab_report(
    client: &dyn GenerativeClient,
    conn: &Connection,
    patient_id: &Uuid,
    report_text: &str,
) -> Result<String, CareError> {
    let patient = get_patient(conn, patient_id)?;
    let prompt = prompts::lab_analysis_prompt(&patient.name, patient.age, report_text);
    Ok(client.generate_text(&prompt)?)
}

/// Persist an analysis into the doctor's unreviewed queue.
pub fn send_analysis_to_doctor(
    conn: &Connection,
    patient_id: &Uuid,
    analysis_text: &str,
) -> Result<AnalysisReport, CareError> {
    let patient = get_patient(conn, patient_id)?;
    let report = AnalysisReport {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        patient_name: patient.name,
        analysis_text: analysis_text.to_string(),
        created_at: chrono::Local::now().naive_local(),
        reviewed: false,
        reviewed_at: None,
    };
    insert_report(conn, &report)?;
    tracing::info!(patient_id = %patient_id, "analysis sent to doctor");
    Ok(report)
}

/// The whole upload flow: extract → analyze → queue for the doctor.
pub fn process_lab_report(
    conn: &Connection,
    session: &CareSession,
    client: &dyn GenerativeClient,
    file: &UploadedFile,
) -> Result<AnalysisReport, CareError> {
    let text = extract_report_text(client, file)?;
    let analysis = analyze_lab_report(client, conn, &session.patient_id(), &text)?;
    send_analysis_to_doctor(conn, &session.patient_id(), &analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockGenerativeClient;
    use crate::db::repository::{get_unreviewed_reports, insert_patient};
    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::Role;
    use crate::models::Patient;

    fn setup() -> (Connection, CareSession) {
        let conn = open_memory_database().unwrap();
        let patient = Patient {
            id: Uuid::new_v4(),
            name: "Michael Chen".into(),
            age: 61,
            registered_at: chrono::Local::now().naive_local(),
        };
        insert_patient(&conn, &patient).unwrap();
        let session = CareSession::open(&conn, patient.id, Role::Patient).unwrap();
        (conn, session)
    }

    #[test]
    fn extraction_normalizes_whitespace() {
        let client = MockGenerativeClient::new("unused");
        let file = UploadedFile::new(
            "labs.txt",
            Some("text/plain"),
            b"Glucose:   140 mg/dL\n\nPotassium:\t4.2 mmol/L".to_vec(),
        );

        let text = extract_report_text(&client, &file).unwrap();
        assert_eq!(text, "Glucose: 140 mg/dL Potassium: 4.2 mmol/L");
    }

    #[test]
    fn processed_report_lands_in_review_queue() {
        let (conn, session) = setup();
        let client =
            MockGenerativeClient::new("Main findings: glucose elevated. Urgency: Medium.");
        let file = UploadedFile::new(
            "labs.csv",
            Some("text/csv"),
            b"test,value\nglucose,140 mg/dL high".to_vec(),
        );

        let report = process_lab_report(&conn, &session, &client, &file).unwrap();
        assert_eq!(report.patient_name, "Michael Chen");
        assert!(!report.reviewed);

        let queue = get_unreviewed_reports(&conn).unwrap();
        assert_eq!(queue.len(), 1);
        assert!(queue[0].analysis_text.contains("glucose elevated"));
    }

    #[test]
    fn api_failure_queues_nothing() {
        let (conn, session) = setup();
        let client = MockGenerativeClient::failing("503 model overloaded");
        let file = UploadedFile::new(
            "labs.txt",
            Some("text/plain"),
            b"Glucose: 140 mg/dL fasting".to_vec(),
        );

        let result = process_lab_report(&conn, &session, &client, &file);
        assert!(matches!(result, Err(CareError::Ai(_))));
        assert!(get_unreviewed_reports(&conn).unwrap().is_empty());
    }
}
