use base64::Engine as _;

use super::ExtractionError;
use crate::ai::GenerativeClient;

/// Extract text from a document image via the vision-capable
/// generative endpoint.
///
/// The image is base64-encoded and sent inline with the caller's fixed
/// instruction prompt; the model's textual reply is the extraction.
pub fn extract_image_text(
    client: &dyn GenerativeClient,
    prompt: &str,
    mime_type: &str,
    image_bytes: &[u8],
) -> Result<String, ExtractionError> {
    let _span = tracing::info_span!(
        "vision_extract",
        mime_type,
        image_size = image_bytes.len(),
    )
    .entered();

    let base64_image = base64::engine::general_purpose::STANDARD.encode(image_bytes);

    let reply = client
        .generate_from_image(prompt, mime_type, &base64_image)
        .map_err(|e| ExtractionError::Vision(e.to_string()))?;

    tracing::info!(text_len = reply.len(), "vision extraction complete");
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockGenerativeClient;

    #[test]
    fn forwards_model_reply() {
        let client =
            MockGenerativeClient::new("Metformin - 500mg - morning\nAtorvastatin - 10mg - evening");
        let text = extract_image_text(&client, "Extract medicines", "image/png", &[1, 2, 3]).unwrap();
        assert!(text.contains("Metformin"));
    }

    #[test]
    fn client_failure_surfaces_as_vision_error() {
        let client = MockGenerativeClient::failing("network unreachable");
        let result = extract_image_text(&client, "Extract medicines", "image/png", &[1, 2, 3]);
        assert!(matches!(result, Err(ExtractionError::Vision(_))));
    }
}
