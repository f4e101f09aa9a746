use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Frequency, ReminderTiming};

/// One medicine parsed out of a prescription line.
///
/// Derived once per uploaded document and never mutated; reminder
/// generation expands these into persistent `Reminder` rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineEntry {
    pub name: String,
    pub dosage: String,
    pub instructions: String,
    pub timing: ReminderTiming,
    pub frequency: Frequency,
    /// The raw prescription line this entry came from.
    pub source_text: String,
}

/// A medicine list delivered to a patient — either prescribed by a
/// doctor or produced from the patient's own prescription upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineList {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_name: String,
    pub content: String,
    pub prescribed: bool,
    pub sent_at: NaiveDateTime,
}
