//! Prescription flows — the one-way upload → text → templates →
//! reminders pipeline, plus the doctor-side analyze-and-send flow.

use rusqlite::Connection;
use uuid::Uuid;

use crate::ai::{prompts, GenerativeClient};
use crate::db::repository::{get_patient, insert_medicine_list};
use crate::error::CareError;
use crate::models::{MedicineList, Reminder};
use crate::pipeline::extraction::{DocumentExtractor, UploadedFile};
use crate::pipeline::structuring::parse_prescription;
use crate::reminders::generate_reminders;
use crate::session::CareSession;

/// Doctor name recorded on a patient's own upload.
const SELF_UPLOADED: &str = "Self-uploaded";

/// Result of a prescription upload.
#[derive(Debug, Clone)]
pub struct SmartReminderOutcome {
    pub extracted_text: String,
    pub reminders: Vec<Reminder>,
    pub medicine_list: MedicineList,
}

/// The patient upload flow: extract text, parse medicine templates,
/// create smart reminders, and keep the raw text as a medicine list.
///
/// Each stage persists before the next runs; a failure leaves earlier
/// stages' output untouched and surfaces to the caller.
pub fn create_smart_reminders(
    conn: &Connection,
    session: &CareSession,
    vision_client: &dyn GenerativeClient,
    file: &UploadedFile,
) -> Result<SmartReminderOutcome, CareError> {
    let extractor = DocumentExtractor::new(vision_client);
    let outcome = extractor.extract(file, prompts::PRESCRIPTION_IMAGE_PROMPT)?;

    let templates = parse_prescription(&outcome.text);
    let reminders = generate_reminders(conn, session, &templates)?;

    let medicine_list = MedicineList {
        id: Uuid::new_v4(),
        patient_id: session.patient_id(),
        doctor_name: SELF_UPLOADED.into(),
        content: outcome.text.clone(),
        prescribed: true,
        sent_at: chrono::Local::now().naive_local(),
    };
    insert_medicine_list(conn, &medicine_list)?;

    tracing::info!(
        patient_id = %session.patient_id(),
        file = %file.file_name,
        reminders = reminders.len(),
        "prescription processed"
    );

    Ok(SmartReminderOutcome {
        extracted_text: outcome.text,
        reminders,
        medicine_list,
    })
}

/// Doctor-side: ask the model for a cleaned-up medicine list from raw
/// prescription text.
pub fn analyze_prescription(
    client: &dyn GenerativeClient,
    conn: &Connection,
    patient_id: &Uuid,
    prescription_text: &str,
) -> Result<String, CareError> {
    let patient = get_patient(conn, patient_id)?;
    let prompt =
        prompts::prescription_analysis_prompt(&patient.name, patient.age, prescription_text);
    Ok(client.generate_text(&prompt)?)
}

/// Deliver a medicine list to a patient.
pub fn send_medicine_list(
    conn: &Connection,
    patient_id: &Uuid,
    doctor_name: &str,
    content: &str,
) -> Result<MedicineList, CareError> {
    let list = MedicineList {
        id: Uuid::new_v4(),
        patient_id: *patient_id,
        doctor_name: doctor_name.to_string(),
        content: content.to_string(),
        prescribed: true,
        sent_at: chrono::Local::now().naive_local(),
    };
    insert_medicine_list(conn, &list)?;
    tracing::info!(patient_id = %patient_id, doctor = doctor_name, "medicine list sent");
    Ok(list)
}
