pub mod adherence;
pub mod alert;
pub mod analysis;
pub mod enums;
pub mod medicine;
pub mod patient;
pub mod reminder;
pub mod vitals;

pub use adherence::{AdherenceEvent, AdherenceSummary};
pub use alert::DoctorAlert;
pub use analysis::AnalysisReport;
pub use enums::*;
pub use medicine::{MedicineEntry, MedicineList};
pub use patient::Patient;
pub use reminder::Reminder;
pub use vitals::VitalsReading;
