//! Exported artifacts — PDF documents and JSON vitals reports.
//!
//! Report content is built as plain text lines first, so identical
//! input state produces byte-identical textual content; timestamps are
//! part of the input, never sampled at render time. The PDF layer just
//! typesets those lines.

use std::io::BufWriter;

use chrono::NaiveDate;
use printpdf::*;
use serde::Serialize;

use crate::error::CareError;
use crate::models::{AdherenceEvent, AdherenceSummary, AnalysisReport, DoctorAlert, MedicineList, Patient, VitalsReading};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const WRAP_COLUMNS: usize = 80;

// ─── Deterministic text layer ─────────────────────────────────────────────────

/// Text content of a medicine-list export.
pub fn medicine_list_lines(list: &MedicineList) -> Vec<String> {
    let mut lines = vec![
        "Your Medicine List".to_string(),
        format!("From: Dr. {}", list.doctor_name),
        format!("Date: {}", list.sent_at.format("%Y-%m-%d")),
        String::new(),
    ];
    lines.extend(list.content.lines().map(str::to_string));
    lines
}

/// Text content of an adherence report export.
pub fn adherence_report_lines(
    patient: &Patient,
    summary: &AdherenceSummary,
    events: &[AdherenceEvent],
) -> Vec<String> {
    let mut lines = vec![
        "Medication Adherence Report".to_string(),
        format!("Patient: {}", patient.name),
        String::new(),
        match summary.rate {
            Some(rate) => format!("Adherence rate: {rate}%"),
            None => "Adherence rate: no data recorded".to_string(),
        },
        format!(
            "Doses: {} recorded, {} taken, {} missed",
            summary.total, summary.taken, summary.missed
        ),
        String::new(),
    ];

    for event in events {
        lines.push(format!(
            "{} - {} - {}",
            event.recorded_at.format("%Y-%m-%d %H:%M"),
            event.medicine_name,
            if event.taken { "Taken" } else { "Missed" }
        ));
    }
    lines
}

/// Text content of a lab-analysis export.
pub fn lab_analysis_lines(report: &AnalysisReport) -> Vec<String> {
    let mut lines = vec![
        "Medical Lab Report Analysis".to_string(),
        format!("Patient: {}", report.patient_name),
        format!("Date: {}", report.created_at.format("%Y-%m-%d")),
        String::new(),
    ];
    lines.extend(report.analysis_text.lines().map(str::to_string));
    lines
}

// ─── PDF rendering ────────────────────────────────────────────────────────────

/// Typeset pre-built report lines into a single-page A4 PDF.
/// The first line is the document title.
pub fn render_pdf(lines: &[String]) -> Result<Vec<u8>, CareError> {
    let title = lines.first().map(String::as_str).unwrap_or("Report");

    let (doc, page1, layer1) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| CareError::Export(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| CareError::Export(format!("PDF font error: {e}")))?;

    let mut y = Mm(280.0);
    layer.use_text(title, 14.0, Mm(20.0), y, &bold);
    y -= Mm(10.0);

    for line in lines.iter().skip(1) {
        if line.is_empty() {
            y -= Mm(4.5);
            continue;
        }
        for wrapped in wrap_text(line, WRAP_COLUMNS) {
            layer.use_text(&wrapped, 9.0, Mm(20.0), y, &font);
            y -= Mm(4.5);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| CareError::Export(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| CareError::Export(format!("PDF buffer error: {e}")))
}

pub fn generate_medicine_list_pdf(list: &MedicineList) -> Result<Vec<u8>, CareError> {
    render_pdf(&medicine_list_lines(list))
}

pub fn generate_adherence_report_pdf(
    patient: &Patient,
    summary: &AdherenceSummary,
    events: &[AdherenceEvent],
) -> Result<Vec<u8>, CareError> {
    render_pdf(&adherence_report_lines(patient, summary, events))
}

pub fn generate_lab_analysis_pdf(report: &AnalysisReport) -> Result<Vec<u8>, CareError> {
    render_pdf(&lab_analysis_lines(report))
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ─── JSON vitals report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct VitalsReport<'a> {
    patient: &'a str,
    report_date: String,
    vitals_history: &'a [VitalsReading],
    emergency_alerts: &'a [DoctorAlert],
}

/// Serialize a patient's vitals history and emergency alerts as a
/// pretty-printed JSON report.
pub fn vitals_report_json(
    patient: &Patient,
    report_date: NaiveDate,
    readings: &[VitalsReading],
    alerts: &[DoctorAlert],
) -> Result<String, CareError> {
    let report = VitalsReport {
        patient: &patient.name,
        report_date: report_date.format("%Y-%m-%d").to_string(),
        vitals_history: readings,
        emergency_alerts: alerts,
    };
    serde_json::to_string_pretty(&report).map_err(|e| CareError::Export(e.to_string()))
}
