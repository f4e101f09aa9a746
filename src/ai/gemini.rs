use serde::{Deserialize, Serialize};

use super::{AiError, GenerativeClient};
use crate::config::AiConfig;

/// HTTP client for the `generateContent` generative endpoint.
pub struct GeminiClient {
    config: AiConfig,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config: AiConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            client,
        }
    }

    /// Client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(AiConfig::from_env())
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn post(&self, body: &GenerateContentRequest) -> Result<String, AiError> {
        let url = self.endpoint_url();

        let response = self
            .client
            .post(&url)
            .header("X-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AiError::Connection(self.config.base_url.clone())
                } else if e.is_timeout() {
                    AiError::Timeout(self.config.timeout_secs)
                } else {
                    AiError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| AiError::ResponseShape(e.to_string()))?;

        extract_reply_text(&parsed)
    }
}

impl GenerativeClient for GeminiClient {
    fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
        };
        self.post(&body)
    }

    fn generate_from_image(
        &self,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String, AiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt), Part::inline_data(mime_type, base64_data)],
            }],
        };
        self.post(&body)
    }
}

// ──────────────────────────────────────────────
// Wire types
// ──────────────────────────────────────────────

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Response body — only the path we read is modelled.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Read `candidates[0].content.parts[0].text`; any missing link in
/// that chain is reported instead of silently yielding nothing.
fn extract_reply_text(response: &GenerateContentResponse) -> Result<String, AiError> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .ok_or_else(|| {
            AiError::ResponseShape("candidates[0].content.parts[0].text is missing".into())
        })
}

// ──────────────────────────────────────────────
// Mock client for tests
// ──────────────────────────────────────────────

/// Mock generative client — returns a configurable reply or error.
pub struct MockGenerativeClient {
    reply: Result<String, String>,
}

impl MockGenerativeClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
        }
    }
}

impl GenerativeClient for MockGenerativeClient {
    fn generate_text(&self, _prompt: &str) -> Result<String, AiError> {
        self.reply.clone().map_err(AiError::HttpClient)
    }

    fn generate_from_image(
        &self,
        _prompt: &str,
        _mime_type: &str,
        _base64_data: &str,
    ) -> Result<String, AiError> {
        self.reply.clone().map_err(AiError::HttpClient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_shape() {
        let client = GeminiClient::new(AiConfig {
            base_url: "https://generativelanguage.googleapis.com/v1beta/".into(),
            model: "gemini-2.0-flash".into(),
            api_key: "k".into(),
            timeout_secs: 60,
        });
        assert_eq!(
            client.endpoint_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn request_serializes_gemini_wire_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text("hello"), Part::inline_data("image/png", "QUJD")],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(json["contents"][0]["parts"][1]["inline_data"]["data"], "QUJD");
        // Text parts carry no inline_data key and vice versa
        assert!(json["contents"][0]["parts"][0].get("inline_data").is_none());
        assert!(json["contents"][0]["parts"][1].get("text").is_none());
    }

    #[test]
    fn reply_text_read_at_fixed_path() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Metformin - 500mg"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply_text(&response).unwrap(), "Metformin - 500mg");
    }

    #[test]
    fn shape_change_is_an_error_not_silence() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(matches!(
            extract_reply_text(&response),
            Err(AiError::ResponseShape(_))
        ));

        let empty: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            extract_reply_text(&empty),
            Err(AiError::ResponseShape(_))
        ));
    }

    #[test]
    fn mock_client_round_trip() {
        let client = MockGenerativeClient::new("analysis text");
        assert_eq!(client.generate_text("p").unwrap(), "analysis text");
        assert!(MockGenerativeClient::failing("boom").generate_text("p").is_err());
    }
}
