use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "CareBridge";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How often callers should refresh imported vitals data (optional poll).
pub const VITALS_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Clock-display refresh cadence for reminder views.
pub const CLOCK_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "carebridge=info".to_string()
}

/// Get the application data directory
/// ~/CareBridge/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("CareBridge")
}

/// Default location of the coordination database.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("carebridge.db")
}

/// Connection settings for the generative-AI endpoint.
///
/// The key is read from `CAREBRIDGE_AI_KEY`; base URL and model can be
/// overridden with `CAREBRIDGE_AI_URL` / `CAREBRIDGE_AI_MODEL` (useful
/// for pointing tests at a stub server).
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl AiConfig {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CAREBRIDGE_AI_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
            model: std::env::var("CAREBRIDGE_AI_MODEL")
                .unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string()),
            api_key: std::env::var("CAREBRIDGE_AI_KEY").unwrap_or_default(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}
