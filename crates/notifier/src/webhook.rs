//! Discord webhook delivery.
//!
//! One validated POST per run. No retries and no timeout beyond the HTTP
//! client's default.

use std::future::Future;

use reqwest::Url;
use reqwest::header::CONTENT_TYPE;

use herald_common::error::NotifyError;
use herald_common::types::DeliveryPayload;

/// Hosts accepted as Discord webhook targets.
///
/// Matched as substrings of the URL host, so `evil-discord.com.attacker.net`
/// passes too. This is a sanity check, not a security boundary.
const DISCORD_HOSTS: [&str; 2] = ["discord.com", "discordapp.com"];

/// Status line and body of a webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON body to a URL and hands back the response.
///
/// Implement this to replace the network in tests.
pub trait WebhookTransport: Send + Sync {
    fn post_json(
        &self,
        url: &Url,
        body: String,
    ) -> impl Future<Output = Result<WebhookResponse, NotifyError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client, e.g. one with a connect timeout.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl WebhookTransport for HttpTransport {
    async fn post_json(&self, url: &Url, body: String) -> Result<WebhookResponse, NotifyError> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        // Only a rejection needs its body; an accepted delivery stays accepted.
        let body = if status.is_success() {
            String::new()
        } else {
            response.text().await?
        };

        Ok(WebhookResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Parse a webhook URL and check that it points at Discord.
pub fn validate_webhook_url(raw: &str) -> Result<Url, NotifyError> {
    let url = Url::parse(raw).map_err(|_| NotifyError::InvalidWebhookUrl(raw.to_string()))?;

    let host = url.host_str().unwrap_or_default();
    if !DISCORD_HOSTS.iter().any(|allowed| host.contains(allowed)) {
        return Err(NotifyError::NonDiscordWebhook(host.to_string()));
    }

    Ok(url)
}

/// Validate the target, then POST the payload exactly once.
///
/// Any non-2xx response becomes [`NotifyError::Delivery`] carrying the
/// status and response body.
pub async fn deliver<T: WebhookTransport>(
    transport: &T,
    webhook_url: &str,
    payload: &DeliveryPayload,
) -> Result<(), NotifyError> {
    let url = validate_webhook_url(webhook_url)?;
    let body = serde_json::to_string(payload)?;

    tracing::debug!(bytes = body.len(), "Posting Discord webhook payload");

    let response = transport.post_json(&url, body).await?;
    if !response.is_success() {
        tracing::warn!(
            status = response.status,
            body = %response.body,
            "Discord webhook rejected the payload"
        );
        return Err(NotifyError::Delivery {
            status: response.status,
            status_text: response.status_text,
            body: response.body,
        });
    }

    tracing::info!(status = response.status, "Discord webhook accepted the payload");
    Ok(())
}
