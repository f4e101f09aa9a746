use serde::{Deserialize, Serialize};

/// Coarse file category driving extractor routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    PlainText,
    Csv,
    Pdf,
    Image,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::PlainText => "plain_text",
            FileCategory::Csv => "csv",
            FileCategory::Pdf => "pdf",
            FileCategory::Image => "image",
        }
    }
}

/// Detect the category from the declared MIME type, falling back to the
/// file extension. Unknown formats are read as plain text — the
/// minimum-content guard catches binary garbage downstream.
pub fn detect_category(mime_type: Option<&str>, file_name: &str) -> FileCategory {
    if let Some(mime) = mime_type {
        if mime.starts_with("image/") {
            return FileCategory::Image;
        }
        match mime {
            "application/pdf" => return FileCategory::Pdf,
            "text/csv" => return FileCategory::Csv,
            "text/plain" => return FileCategory::PlainText,
            _ => {}
        }
    }

    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        FileCategory::Pdf
    } else if lower.ends_with(".csv") {
        FileCategory::Csv
    } else if lower.ends_with(".png")
        || lower.ends_with(".jpg")
        || lower.ends_with(".jpeg")
        || lower.ends_with(".webp")
    {
        FileCategory::Image
    } else {
        FileCategory::PlainText
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_takes_precedence() {
        assert_eq!(
            detect_category(Some("application/pdf"), "scan.txt"),
            FileCategory::Pdf
        );
        assert_eq!(
            detect_category(Some("image/jpeg"), "prescription"),
            FileCategory::Image
        );
    }

    #[test]
    fn extension_fallback() {
        assert_eq!(detect_category(None, "report.PDF"), FileCategory::Pdf);
        assert_eq!(detect_category(None, "labs.csv"), FileCategory::Csv);
        assert_eq!(detect_category(None, "photo.jpeg"), FileCategory::Image);
    }

    #[test]
    fn unknown_defaults_to_plain_text() {
        assert_eq!(detect_category(None, "notes.doc"), FileCategory::PlainText);
        assert_eq!(
            detect_category(Some("application/octet-stream"), "mystery"),
            FileCategory::PlainText
        );
    }
}
