//! Generative-AI endpoint access.
//!
//! One HTTPS POST per operation, response read at a fixed path. No
//! retry and no backoff: a failed call surfaces to the caller and
//! leaves prior state untouched.

pub mod gemini;
pub mod prompts;

pub use gemini::{GeminiClient, MockGenerativeClient};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Could not reach the AI endpoint at {0}")]
    Connection(String),

    #[error("AI request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("AI endpoint returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),
}

/// Generative model abstraction (allows mocking)
pub trait GenerativeClient {
    /// Send a text prompt, get the model's textual reply.
    fn generate_text(&self, prompt: &str) -> Result<String, AiError>;

    /// Send a prompt plus one inline base64-encoded image.
    fn generate_from_image(
        &self,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String, AiError>;
}
