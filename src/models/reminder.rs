use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Frequency, ReminderStatus, ReminderTiming};

/// A scheduled instruction to take a specific medicine at a time-of-day
/// bucket. Created in batches from parsed prescription entries.
///
/// Status is monotonic: the single pending → taken|missed transition is
/// the only mutation; records are removed only by bulk clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub medicine_name: String,
    pub dosage: String,
    pub timing: ReminderTiming,
    pub frequency: Frequency,
    pub instructions: String,
    pub status: ReminderStatus,
    pub created_at: NaiveDateTime,
}
