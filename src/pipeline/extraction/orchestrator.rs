use super::types::{ExtractionMethod, ExtractionOutcome, UploadedFile};
use super::{format::FileCategory, pdf, text, vision, ExtractionError, MIN_TEXT_LENGTH};
use crate::ai::GenerativeClient;

/// Routes an uploaded file to the right extractor and applies the
/// minimum-content guard to whatever comes back.
pub struct DocumentExtractor<'a> {
    vision_client: &'a dyn GenerativeClient,
}

impl<'a> DocumentExtractor<'a> {
    pub fn new(vision_client: &'a dyn GenerativeClient) -> Self {
        Self { vision_client }
    }

    /// Extract raw text from an upload. `vision_prompt` is the fixed
    /// instruction sent along with image bytes; the other categories
    /// never touch the network.
    pub fn extract(
        &self,
        file: &UploadedFile,
        vision_prompt: &str,
    ) -> Result<ExtractionOutcome, ExtractionError> {
        let category = file.category();
        tracing::info!(
            file_name = %file.file_name,
            category = category.as_str(),
            size = file.bytes.len(),
            "starting extraction"
        );

        let (raw, method) = match category {
            FileCategory::PlainText | FileCategory::Csv => {
                (text::decode_text(&file.bytes)?, ExtractionMethod::PlainTextRead)
            }
            FileCategory::Pdf => (pdf::extract_pdf_text(&file.bytes)?, ExtractionMethod::PdfDirect),
            FileCategory::Image => {
                let mime = file.mime_type.as_deref().unwrap_or("image/png");
                (
                    vision::extract_image_text(self.vision_client, vision_prompt, mime, &file.bytes)?,
                    ExtractionMethod::VisionModel,
                )
            }
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }
        if trimmed.len() < MIN_TEXT_LENGTH {
            return Err(ExtractionError::TooShort {
                length: trimmed.len(),
            });
        }

        tracing::info!(
            method = ?method,
            text_length = trimmed.len(),
            "extraction complete"
        );

        Ok(ExtractionOutcome {
            text: trimmed.to_string(),
            method,
        })
    }
}
