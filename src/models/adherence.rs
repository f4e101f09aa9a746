use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One reminder resolution, appended when a patient marks a dose taken
/// or missed. The log is append-only; aggregates are recomputed from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceEvent {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub medicine_name: String,
    pub taken: bool,
    pub reminder_id: Uuid,
    pub recorded_at: NaiveDateTime,
}

/// Aggregate over a patient's full adherence history.
///
/// `rate` is `None` when no events exist — empty history means
/// insufficient data, not good adherence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherenceSummary {
    pub total: u32,
    pub taken: u32,
    pub missed: u32,
    pub rate: Option<u8>,
}
