use thiserror::Error;

/// Errors raised anywhere between reading inputs and delivering the webhook.
///
/// Every variant is caught once at the top level and reported to the host as a
/// single failure message.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    #[error("Invalid color '{0}': expected a hex value between 000000 and ffffff")]
    InvalidColor(String),

    #[error("Invalid webhook URL: invalid URL '{0}'")]
    InvalidWebhookUrl(String),

    #[error("Invalid webhook URL: must be a Discord webhook URL (host '{0}')")]
    NonDiscordWebhook(String),

    #[error("Discord webhook request failed: {status} {status_text} - {body}")]
    Delivery {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Event context error: {0}")]
    Event(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
