//! The notification pipeline: inputs → classify → build → deliver.

use chrono::{DateTime, Utc};

use herald_common::config::{ActionConfig, VarSource};
use herald_common::error::NotifyError;
use herald_common::types::{DeliveryPayload, EventContext};
use herald_notifier::builder::{RenderMode, build_notification, classify};
use herald_notifier::format::{parse_hex_color, short_sha};
use herald_notifier::webhook::{WebhookTransport, deliver};

use crate::context::load_event_context;

/// Build the notification for `ctx` and deliver it once.
///
/// Returns the payload that was accepted by the webhook.
pub async fn run<T: WebhookTransport>(
    config: &ActionConfig,
    ctx: &EventContext,
    transport: &T,
    now: DateTime<Utc>,
) -> Result<DeliveryPayload, NotifyError> {
    tracing::info!(
        repository = %ctx.full_name(),
        event = %ctx.event_name,
        "Preparing Discord notification"
    );

    let color = parse_hex_color(&config.color)?;
    let mode = classify(ctx);

    match &mode {
        RenderMode::Release(release) => tracing::info!(
            tag = %release.tag_name,
            name = %release.display_name(),
            "Rendering release notification"
        ),
        RenderMode::Push { branch, sha } => tracing::info!(
            branch = %branch,
            commit = %short_sha(sha),
            "Rendering push notification"
        ),
    }

    let notification = build_notification(ctx, &mode, color, &config.footer, now);
    let payload = DeliveryPayload::new(
        config.username.as_str(),
        config.avatar_url.as_str(),
        config.content.as_str(),
        notification,
    );

    deliver(transport, &config.webhook_url, &payload).await?;

    tracing::info!(repository = %ctx.full_name(), "Discord notification sent");
    Ok(payload)
}

/// Read inputs and event context from `source`, then run the pipeline.
pub async fn run_from_source<T: WebhookTransport>(
    source: &impl VarSource,
    transport: &T,
) -> Result<DeliveryPayload, NotifyError> {
    let config = ActionConfig::from_source(source)?;
    let ctx = load_event_context(source)?;
    run(&config, &ctx, transport, Utc::now()).await
}
