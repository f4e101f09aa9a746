use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AlertKind, AlertPriority};

/// A clinician-facing notification derived from adherence history or
/// vital-sign thresholds. Reviewing deactivates it; nothing deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorAlert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub priority: AlertPriority,
    pub title: String,
    pub message: String,
    pub patient_id: Uuid,
    pub created_at: NaiveDateTime,
    pub active: bool,
    pub action_required: bool,
}
