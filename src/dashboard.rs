//! Doctor dashboard backend — per-patient summaries, the alert feed,
//! and the analysis review queue.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{
    deactivate_alert, get_patient, has_active_alert, insert_alert, latest_reading,
    list_active_alerts, list_patients, mark_report_reviewed, summarize,
    get_reviewed_reports, get_unreviewed_reports,
};
use crate::error::CareError;
use crate::models::enums::{AlertKind, AlertPriority};
use crate::models::{AdherenceSummary, AnalysisReport, DoctorAlert, VitalsReading};

/// Adherence below this line counts as poor compliance.
const COMPLIANCE_THRESHOLD: u8 = 70;

/// Below this line the adherence alert escalates to critical.
const CRITICAL_ADHERENCE_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Good,
    Poor,
    /// No resolved reminders yet — nothing to judge.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    High,
    Unknown,
}

/// A patient card for the dashboard list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub patient_id: Uuid,
    pub name: String,
    pub age: i32,
    pub adherence: AdherenceSummary,
    pub compliance_status: ComplianceStatus,
    pub risk_level: RiskLevel,
    pub last_vitals: Option<VitalsReading>,
    pub active_alerts: u32,
}

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub patients: Vec<PatientSummary>,
    pub alerts: Vec<DoctorAlert>,
    pub pending_reports: Vec<AnalysisReport>,
}

/// Build one patient's summary card (read-only).
pub fn load_patient_summary(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<PatientSummary, CareError> {
    let patient = get_patient(conn, patient_id)?;
    let adherence = summarize(conn, patient_id)?;
    let last_vitals = latest_reading(conn, patient_id)?;
    let active_alerts =
        crate::db::repository::get_active_alerts(conn, patient_id)?.len() as u32;

    let (compliance_status, risk_level) = match adherence.rate {
        None => (ComplianceStatus::Unknown, RiskLevel::Unknown),
        Some(rate) if rate >= COMPLIANCE_THRESHOLD => (ComplianceStatus::Good, RiskLevel::Low),
        Some(_) => (ComplianceStatus::Poor, RiskLevel::High),
    };

    Ok(PatientSummary {
        patient_id: patient.id,
        name: patient.name,
        age: patient.age,
        adherence,
        compliance_status,
        risk_level,
        last_vitals,
        active_alerts,
    })
}

/// The low-adherence rule: below the compliance line (with at least
/// one resolved reminder) the doctor gets an alert — critical under
/// 50%, high otherwise. Suppressed while one is already active.
pub fn check_adherence_alert(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<DoctorAlert>, CareError> {
    let adherence = summarize(conn, patient_id)?;
    let rate = match adherence.rate {
        Some(rate) if rate < COMPLIANCE_THRESHOLD => rate,
        _ => return Ok(None),
    };
    if has_active_alert(conn, patient_id, &AlertKind::AdherenceRate)? {
        return Ok(None);
    }

    let patient = get_patient(conn, patient_id)?;
    let alert = DoctorAlert {
        id: Uuid::new_v4(),
        kind: AlertKind::AdherenceRate,
        priority: if rate < CRITICAL_ADHERENCE_THRESHOLD {
            AlertPriority::Critical
        } else {
            AlertPriority::High
        },
        title: "Medication Adherence Alert".into(),
        message: format!("{} has {rate}% medication adherence rate", patient.name),
        patient_id: patient.id,
        created_at: chrono::Local::now().naive_local(),
        active: true,
        action_required: false,
    };
    insert_alert(conn, &alert)?;
    Ok(Some(alert))
}

/// Load the whole dashboard: summaries for every registered patient
/// (running the adherence rule on each), the active alert feed, and
/// the pending analysis queue.
pub fn load_dashboard(conn: &Connection) -> Result<DashboardData, CareError> {
    let mut patients = Vec::new();
    for patient in list_patients(conn)? {
        check_adherence_alert(conn, &patient.id)?;
        patients.push(load_patient_summary(conn, &patient.id)?);
    }

    Ok(DashboardData {
        alerts: list_active_alerts(conn)?,
        pending_reports: get_unreviewed_reports(conn)?,
        patients,
    })
}

/// Previously reviewed analyses, newest first.
pub fn reviewed_reports(conn: &Connection) -> Result<Vec<AnalysisReport>, CareError> {
    Ok(get_reviewed_reports(conn)?)
}

/// Mark an analysis reviewed (terminal).
pub fn review_report(conn: &Connection, report_id: &Uuid) -> Result<(), CareError> {
    let now = chrono::Local::now().naive_local();
    mark_report_reviewed(conn, report_id, &now)?;
    tracing::info!(report_id = %report_id, "analysis report reviewed");
    Ok(())
}

/// Deactivate an alert after review. The record stays.
pub fn review_alert(conn: &Connection, alert_id: &Uuid) -> Result<(), CareError> {
    deactivate_alert(conn, alert_id)?;
    tracing::info!(alert_id = %alert_id, "doctor alert reviewed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adherence::resolve;
    use crate::db::repository::insert_patient;
    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::Role;
    use crate::models::Patient;
    use crate::pipeline::structuring::parse_prescription;
    use crate::reminders::generate_reminders;
    use crate::session::CareSession;

    fn seeded(name: &str) -> (Connection, CareSession) {
        let conn = open_memory_database().unwrap();
        let patient = Patient {
            id: Uuid::new_v4(),
            name: name.into(),
            age: 52,
            registered_at: chrono::Local::now().naive_local(),
        };
        insert_patient(&conn, &patient).unwrap();
        let session = CareSession::open(&conn, patient.id, Role::Patient).unwrap();
        (conn, session)
    }

    fn resolve_n(conn: &Connection, session: &CareSession, taken: usize, missed: usize) {
        let text = (0..taken + missed)
            .map(|i| format!("Med{i} - 5mg - morning"))
            .collect::<Vec<_>>()
            .join("\n");
        let created =
            generate_reminders(conn, session, &parse_prescription(&text)).unwrap();
        for (i, reminder) in created.iter().enumerate() {
            resolve(conn, session, &reminder.id, i < taken).unwrap();
        }
    }

    #[test]
    fn no_history_is_unknown_compliance() {
        let (conn, session) = seeded("Sarah Johnson");
        let summary = load_patient_summary(&conn, &session.patient_id()).unwrap();
        assert_eq!(summary.adherence.rate, None);
        assert_eq!(summary.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(summary.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn good_adherence_is_low_risk_and_no_alert() {
        let (conn, session) = seeded("Sarah Johnson");
        resolve_n(&conn, &session, 9, 1); // 90%

        let summary = load_patient_summary(&conn, &session.patient_id()).unwrap();
        assert_eq!(summary.compliance_status, ComplianceStatus::Good);
        assert_eq!(summary.risk_level, RiskLevel::Low);
        assert!(check_adherence_alert(&conn, &session.patient_id())
            .unwrap()
            .is_none());
    }

    #[test]
    fn poor_adherence_raises_high_alert() {
        let (conn, session) = seeded("Michael Chen");
        resolve_n(&conn, &session, 3, 2); // 60%

        let alert = check_adherence_alert(&conn, &session.patient_id())
            .unwrap()
            .expect("low-adherence alert");
        assert_eq!(alert.kind, AlertKind::AdherenceRate);
        assert_eq!(alert.priority, AlertPriority::High);
        assert!(alert.message.contains("60% medication adherence rate"));
    }

    #[test]
    fn very_poor_adherence_is_critical_and_deduplicated() {
        let (conn, session) = seeded("Michael Chen");
        resolve_n(&conn, &session, 1, 3); // 25%

        let first = check_adherence_alert(&conn, &session.patient_id()).unwrap();
        assert_eq!(first.unwrap().priority, AlertPriority::Critical);

        // Re-running the rule while the alert is active adds nothing.
        assert!(check_adherence_alert(&conn, &session.patient_id())
            .unwrap()
            .is_none());
    }

    #[test]
    fn dashboard_collects_patients_alerts_and_queue() {
        let (conn, session) = seeded("Sarah Johnson");
        resolve_n(&conn, &session, 1, 3);
        crate::labs::send_analysis_to_doctor(&conn, &session.patient_id(), "Urgency: High")
            .unwrap();

        let data = load_dashboard(&conn).unwrap();
        assert_eq!(data.patients.len(), 1);
        assert_eq!(data.pending_reports.len(), 1);
        // Missed-dose alert from the resolutions + adherence-rate alert from the rule
        assert!(data.alerts.len() >= 2);
    }

    #[test]
    fn reviewing_report_moves_it_out_of_pending() {
        let (conn, session) = seeded("Sarah Johnson");
        let report =
            crate::labs::send_analysis_to_doctor(&conn, &session.patient_id(), "All normal")
                .unwrap();

        review_report(&conn, &report.id).unwrap();

        let data = load_dashboard(&conn).unwrap();
        assert!(data.pending_reports.is_empty());
        assert_eq!(reviewed_reports(&conn).unwrap().len(), 1);
    }
}
