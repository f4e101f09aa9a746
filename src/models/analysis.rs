use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An AI lab-report analysis forwarded to the doctor's review queue.
/// Mutated once (the reviewed flag) and then terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub analysis_text: String,
    pub created_at: NaiveDateTime,
    pub reviewed: bool,
    pub reviewed_at: Option<NaiveDateTime>,
}
