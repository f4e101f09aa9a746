use super::ExtractionError;

/// Decode a plain-text or CSV upload as UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text =
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::EncodingError(e.to_string()))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8() {
        let text = decode_text("Paracetamol - 500mg - after food".as_bytes()).unwrap();
        assert!(text.contains("Paracetamol"));
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        let result = decode_text(&[0xff, 0xfe, 0x00, 0x41]);
        assert!(matches!(result, Err(ExtractionError::EncodingError(_))));
    }
}
