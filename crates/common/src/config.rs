use serde::{Deserialize, Serialize};

/// Default Bot API base. A bot token is appended directly, so the trailing
/// segment ends in `bot` without a slash.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org/bot";

/// Default base for downloading files resolved via `getFile`.
pub const DEFAULT_TELEGRAM_FILE_URL: &str = "https://api.telegram.org/file/bot";

/// Immutable runtime configuration, built once at startup and passed by
/// reference into every component. There is deliberately no way to mutate a
/// `BridgeConfig` after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Public base URL of this bridge, used as the webhook callback target.
    pub base_url: String,

    /// Helpdesk platform API base URL.
    pub api_url: String,

    /// Bot API base URL (token appended).
    pub telegram_api_url: String,

    /// File download base URL (token appended).
    pub telegram_file_url: String,

    /// Display name shown in user-facing status messages.
    pub brand_name: Option<String>,
}

impl BridgeConfig {
    pub fn new(base_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_url: api_url.into(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            telegram_file_url: DEFAULT_TELEGRAM_FILE_URL.to_string(),
            brand_name: None,
        }
    }

    pub fn with_telegram_api_url(mut self, url: impl Into<String>) -> Self {
        self.telegram_api_url = url.into();
        self
    }

    pub fn with_telegram_file_url(mut self, url: impl Into<String>) -> Self {
        self.telegram_file_url = url.into();
        self
    }

    pub fn with_brand_name(mut self, name: impl Into<String>) -> Self {
        self.brand_name = Some(name.into());
        self
    }

    /// Name used in user-facing responses ("<brand> not installed").
    pub fn display_name(&self) -> &str {
        self.brand_name.as_deref().unwrap_or("deskrelay")
    }
}
