pub mod adherence;
pub mod alert;
pub mod analysis;
pub mod medicine;
pub mod patient;
pub mod reminder;
pub mod vitals;

pub use adherence::*;
pub use alert::*;
pub use analysis::*;
pub use medicine::*;
pub use patient::*;
pub use reminder::*;
pub use vitals::*;

/// SQLite TEXT datetime format shared by all repositories.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
