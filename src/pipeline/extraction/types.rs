use serde::{Deserialize, Serialize};

use super::format::FileCategory;

/// An uploaded document, as handed over by the file picker.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: &str, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.map(str::to_string),
            bytes,
        }
    }

    pub fn category(&self) -> FileCategory {
        super::format::detect_category(self.mime_type.as_deref(), &self.file_name)
    }
}

/// How text was extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    PlainTextRead,
    PdfDirect,
    VisionModel,
}

/// Result of text extraction from a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    pub text: String,
    pub method: ExtractionMethod,
}
