use super::ExtractionError;

/// Extract the embedded text layer from a digital PDF.
///
/// No rendering, no OCR — scanned PDFs without a text layer come out
/// empty and fail the minimum-content guard downstream.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

    if page_texts.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    Ok(page_texts.join("\n"))
}
