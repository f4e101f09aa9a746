use std::sync::OnceLock;

use regex::Regex;

use crate::models::enums::{Frequency, ReminderTiming};
use crate::models::MedicineEntry;

/// Dosage assumed when the line carries none.
const DEFAULT_DOSAGE: &str = "1 tablet";

/// `1.` / `2)` style list numbering at the start of a medicine name.
fn numbering_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+[.)]?\s*").unwrap())
}

/// Parse prescription text into medicine templates.
///
/// One template per `Name - Dosage - Instructions` line; twice-daily
/// medicines expand into a morning + evening pair. Lines without a
/// `-` delimiter are skipped silently.
pub fn parse_prescription(text: &str) -> Vec<MedicineEntry> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('-').map(str::trim).collect();
        if parts.len() < 2 {
            continue;
        }

        let name = numbering_pattern().replace(parts[0], "").trim().to_string();
        if name.is_empty() {
            continue;
        }

        let dosage = if parts[1].is_empty() {
            DEFAULT_DOSAGE.to_string()
        } else {
            parts[1].to_string()
        };
        let instructions = parts.get(2).copied().unwrap_or("").to_string();
        let lower = instructions.to_lowercase();

        let twice_daily = lower.contains("twice") || lower.contains("2 times");
        if twice_daily {
            // Two doses a day: fixed morning + evening pair.
            entries.push(MedicineEntry {
                name: name.clone(),
                dosage: dosage.clone(),
                instructions: instructions.clone(),
                timing: ReminderTiming::Morning,
                frequency: Frequency::TwiceDaily,
                source_text: line.to_string(),
            });
            entries.push(MedicineEntry {
                name,
                dosage,
                instructions: format!("{instructions} (Second dose)"),
                timing: ReminderTiming::Evening,
                frequency: Frequency::TwiceDaily,
                source_text: line.to_string(),
            });
        } else {
            entries.push(MedicineEntry {
                name,
                dosage,
                instructions,
                timing: infer_timing(&lower),
                frequency: Frequency::OnceDaily,
                source_text: line.to_string(),
            });
        }
    }

    tracing::debug!(templates = entries.len(), "prescription parsed");
    entries
}

/// Keyword precedence: evening/night/bedtime > afternoon/lunch >
/// morning/breakfast, defaulting to morning.
fn infer_timing(instructions_lower: &str) -> ReminderTiming {
    if instructions_lower.contains("evening")
        || instructions_lower.contains("night")
        || instructions_lower.contains("bedtime")
    {
        ReminderTiming::Evening
    } else if instructions_lower.contains("afternoon") || instructions_lower.contains("lunch") {
        ReminderTiming::Afternoon
    } else {
        ReminderTiming::Morning
    }
}
