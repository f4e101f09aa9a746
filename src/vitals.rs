//! Vitals logging and fixed-threshold emergency alerting.
//!
//! Threshold evaluation is a pure derivation with no hysteresis or
//! debouncing: every qualifying reading re-emits its alerts.

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{get_patient, insert_alert, insert_reading};
use crate::error::CareError;
use crate::models::enums::{AlertKind, AlertPriority, VitalsSource};
use crate::models::{DoctorAlert, VitalsReading};
use crate::session::CareSession;

/// One set of measurements from the health logger or a fitness import.
#[derive(Debug, Clone, Default)]
pub struct VitalsSample {
    pub heart_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub steps: Option<f64>,
    pub weight: Option<f64>,
}

/// A threshold violation derived from a single reading.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalAlert {
    pub kind: AlertKind,
    pub priority: AlertPriority,
    pub message: String,
}

/// Apply the fixed clinical thresholds to one sample.
pub fn evaluate_vitals(sample: &VitalsSample) -> Vec<VitalAlert> {
    let mut alerts = Vec::new();

    if let Some(hr) = sample.heart_rate {
        if hr < 50.0 {
            alerts.push(VitalAlert {
                kind: AlertKind::HeartRateCriticalLow,
                priority: AlertPriority::Critical,
                message: format!(
                    "Heart rate critically low: {hr} bpm - Seek immediate medical attention"
                ),
            });
        } else if hr < 60.0 {
            alerts.push(VitalAlert {
                kind: AlertKind::HeartRateLow,
                priority: AlertPriority::High,
                message: format!("Heart rate low: {hr} bpm"),
            });
        } else if hr > 120.0 {
            alerts.push(VitalAlert {
                kind: AlertKind::HeartRateCriticalHigh,
                priority: AlertPriority::Critical,
                message: format!(
                    "Heart rate critically high: {hr} bpm - Seek immediate medical attention"
                ),
            });
        } else if hr > 100.0 {
            alerts.push(VitalAlert {
                kind: AlertKind::HeartRateHigh,
                priority: AlertPriority::High,
                message: format!("Heart rate elevated: {hr} bpm"),
            });
        }
    }

    if let Some(o2) = sample.oxygen_saturation {
        if o2 < 90.0 {
            alerts.push(VitalAlert {
                kind: AlertKind::OxygenCriticalLow,
                priority: AlertPriority::Critical,
                message: format!(
                    "Oxygen saturation critically low: {o2}% - Seek immediate medical attention"
                ),
            });
        } else if o2 < 95.0 {
            alerts.push(VitalAlert {
                kind: AlertKind::OxygenLow,
                priority: AlertPriority::High,
                message: format!("Oxygen saturation low: {o2}%"),
            });
        }
    }

    alerts
}

/// Persist a reading and every doctor alert its thresholds derive.
pub fn record_vitals(
    conn: &Connection,
    session: &CareSession,
    sample: &VitalsSample,
    source: VitalsSource,
) -> Result<(VitalsReading, Vec<DoctorAlert>), CareError> {
    let patient = get_patient(conn, &session.patient_id())?;
    let now = chrono::Local::now().naive_local();

    let reading = VitalsReading {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        heart_rate: sample.heart_rate,
        oxygen_saturation: sample.oxygen_saturation,
        steps: sample.steps,
        weight: sample.weight,
        source,
        recorded_at: now,
    };
    insert_reading(conn, &reading)?;

    let mut emitted = Vec::new();
    for vital_alert in evaluate_vitals(sample) {
        let critical = vital_alert.priority == AlertPriority::Critical;
        let alert = DoctorAlert {
            id: Uuid::new_v4(),
            kind: vital_alert.kind,
            priority: vital_alert.priority,
            title: if critical {
                "CRITICAL - Patient Vital Alert".into()
            } else {
                "Patient Vital Alert".into()
            },
            message: format!("{}: {}", patient.name, vital_alert.message),
            patient_id: patient.id,
            created_at: now,
            active: true,
            action_required: critical,
        };
        insert_alert(conn, &alert)?;
        emitted.push(alert);
    }

    if !emitted.is_empty() {
        tracing::warn!(
            patient_id = %patient.id,
            alerts = emitted.len(),
            "vitals thresholds crossed"
        );
    }

    Ok((reading, emitted))
}
