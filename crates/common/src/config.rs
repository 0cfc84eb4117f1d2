use std::collections::HashMap;

use crate::error::NotifyError;

/// Default accent color (mid purple).
pub const DEFAULT_COLOR: &str = "8892be";

pub const DEFAULT_USERNAME: &str = "GitHub Release";

/// Twemoji "package" icon.
pub const DEFAULT_AVATAR_URL: &str =
    "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/72x72/1f4e6.png";

pub const DEFAULT_CONTENT: &str = "A new release is now available!";

pub const DEFAULT_FOOTER: &str = "Powered by Lettermint";

/// Read-only view of the key-value store the host hands us.
///
/// The process environment is the production source; tests use a `HashMap`.
pub trait VarSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads variables from the current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Environment variable name under which GitHub Actions exposes an input.
///
/// `webhook_url` becomes `INPUT_WEBHOOK_URL`.
pub fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Look up an action input, treating blank values as absent.
pub fn get_input(source: &impl VarSource, name: &str) -> Option<String> {
    source
        .var(&input_env_key(name))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Action inputs, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    /// Discord webhook target (required)
    pub webhook_url: String,

    /// Embed accent color as a hex string, with or without a leading `#`
    pub color: String,

    /// Display name the webhook posts as
    pub username: String,

    /// Avatar image the webhook posts with
    pub avatar_url: String,

    /// Plain message text shown above the embed
    pub content: String,

    /// Embed footer text
    pub footer: String,
}

impl ActionConfig {
    /// Build the configuration from the host's input store.
    pub fn from_source(source: &impl VarSource) -> Result<Self, NotifyError> {
        let with_default =
            |name: &str, default: &str| get_input(source, name).unwrap_or_else(|| default.to_string());

        let config = Self {
            webhook_url: get_input(source, "webhook_url")
                .ok_or_else(|| NotifyError::MissingInput("webhook_url".to_string()))?,
            color: with_default("color", DEFAULT_COLOR),
            username: with_default("username", DEFAULT_USERNAME),
            avatar_url: with_default("avatar_url", DEFAULT_AVATAR_URL),
            content: with_default("content", DEFAULT_CONTENT),
            footer: with_default("footer", DEFAULT_FOOTER),
        };

        tracing::debug!(
            username = %config.username,
            color = %config.color,
            "Loaded action inputs"
        );
        Ok(config)
    }
}
