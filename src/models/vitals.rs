use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::VitalsSource;

/// A point-in-time vitals reading, logged manually or imported from a
/// fitness sync. Absent measurements stay `None`; threshold evaluation
/// skips them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsReading {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub heart_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub steps: Option<f64>,
    pub weight: Option<f64>,
    pub source: VitalsSource,
    pub recorded_at: NaiveDateTime,
}
