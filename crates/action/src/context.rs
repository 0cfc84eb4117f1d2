//! Event context loading from the GitHub Actions environment.

use std::path::Path;

use herald_common::config::VarSource;
use herald_common::error::NotifyError;
use herald_common::types::{DEFAULT_SERVER_URL, EventContext, Release};

fn non_empty(source: &impl VarSource, key: &str) -> Option<String> {
    source.var(key).filter(|v| !v.trim().is_empty())
}

/// Read and parse the JSON event payload at `path`.
pub fn read_event_payload(path: &Path) -> Result<serde_json::Value, NotifyError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load the event context, including the payload at `GITHUB_EVENT_PATH` when
/// that file exists.
pub fn load_event_context(source: &impl VarSource) -> Result<EventContext, NotifyError> {
    let payload = match non_empty(source, "GITHUB_EVENT_PATH") {
        Some(path) if Path::new(&path).is_file() => Some(read_event_payload(Path::new(&path))?),
        Some(path) => {
            tracing::warn!(path = %path, "Event payload file not found, continuing without it");
            None
        }
        None => None,
    };

    event_context_from_parts(source, payload.as_ref())
}

/// Assemble the context from `GITHUB_*` variables and an already parsed
/// event payload.
pub fn event_context_from_parts(
    source: &impl VarSource,
    payload: Option<&serde_json::Value>,
) -> Result<EventContext, NotifyError> {
    let repository = non_empty(source, "GITHUB_REPOSITORY")
        .ok_or_else(|| NotifyError::Event("GITHUB_REPOSITORY is not set".to_string()))?;

    let (owner, repo) = repository
        .split_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
        .ok_or_else(|| {
            NotifyError::Event(format!(
                "GITHUB_REPOSITORY must look like owner/repo, got '{repository}'"
            ))
        })?;

    let release = payload
        .and_then(|p| p.get("release"))
        .filter(|v| !v.is_null())
        .map(|v| serde_json::from_value::<Release>(v.clone()))
        .transpose()?;

    let server_url = non_empty(source, "GITHUB_SERVER_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    Ok(EventContext {
        owner: owner.to_string(),
        repo: repo.to_string(),
        sha: source.var("GITHUB_SHA").unwrap_or_default(),
        git_ref: source.var("GITHUB_REF").unwrap_or_default(),
        event_name: source.var("GITHUB_EVENT_NAME").unwrap_or_default(),
        server_url,
        release,
    })
}
