//! Document text extraction — uploaded file bytes to raw text.
//!
//! Plain text and CSV decode directly, PDFs go through the embedded
//! text layer, images are forwarded to the vision-capable generative
//! endpoint. Every path ends at the same minimum-content guard.

pub mod format;
pub mod orchestrator;
pub mod pdf;
pub mod text;
pub mod types;
pub mod vision;

pub use format::FileCategory;
pub use orchestrator::DocumentExtractor;
pub use types::{ExtractionMethod, ExtractionOutcome, UploadedFile};

use thiserror::Error;

/// Shortest extracted text considered usable. Anything below this is a
/// data-quality failure surfaced to the uploader.
pub const MIN_TEXT_LENGTH: usize = 10;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("File appears to be empty or unreadable")]
    EmptyDocument,

    #[error("Could not extract enough text ({length} chars) — please try a clearer file")]
    TooShort { length: usize },

    #[error("File is not valid UTF-8 text: {0}")]
    EncodingError(String),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Vision extraction failed: {0}")]
    Vision(String),
}
