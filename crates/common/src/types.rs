use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Release metadata from a `release` event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
}

impl Release {
    /// Release name when set, otherwise the tag.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.tag_name.as_str(),
        }
    }
}

/// The triggering event as supplied by the host. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub owner: String,
    pub repo: String,
    /// Full commit SHA
    pub sha: String,
    /// Raw ref, e.g. `refs/heads/main`
    pub git_ref: String,
    /// Event kind, e.g. `push` or `release`
    pub event_name: String,
    /// Base URL of the GitHub instance, without a trailing slash
    pub server_url: String,
    pub release: Option<Release>,
}

impl EventContext {
    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn repo_url(&self) -> String {
        format!("{}/{}/{}", self.server_url, self.owner, self.repo)
    }

    pub fn commit_url(&self) -> String {
        format!("{}/commit/{}", self.repo_url(), self.sha)
    }
}

/// One `name`/`value` row of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// A Discord embed describing one push or release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub url: String,
    /// RGB accent color, 0..=0xFFFFFF
    pub color: u32,
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

/// Body POSTed to the Discord webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPayload {
    pub username: String,
    pub avatar_url: String,
    pub content: String,
    pub embeds: Vec<Notification>,
}

impl DeliveryPayload {
    pub fn new(
        username: impl Into<String>,
        avatar_url: impl Into<String>,
        content: impl Into<String>,
        notification: Notification,
    ) -> Self {
        Self {
            username: username.into(),
            avatar_url: avatar_url.into(),
            content: content.into(),
            embeds: vec![notification],
        }
    }

    /// The single embed carried by this payload.
    pub fn notification(&self) -> Option<&Notification> {
        self.embeds.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EventContext {
        EventContext {
            owner: "lettermint".to_string(),
            repo: "test-repo".to_string(),
            sha: "abc123def456789".to_string(),
            git_ref: "refs/heads/main".to_string(),
            event_name: "push".to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            release: None,
        }
    }

    #[test]
    fn test_context_urls() {
        let ctx = context();
        assert_eq!(ctx.full_name(), "lettermint/test-repo");
        assert_eq!(ctx.repo_url(), "https://github.com/lettermint/test-repo");
        assert_eq!(
            ctx.commit_url(),
            "https://github.com/lettermint/test-repo/commit/abc123def456789"
        );
    }

    #[test]
    fn test_release_display_name() {
        let mut release = Release {
            tag_name: "v1.0.0".to_string(),
            name: Some("Major Update".to_string()),
            body: None,
            html_url: "https://github.com/o/r/releases/tag/v1.0.0".to_string(),
        };
        assert_eq!(release.display_name(), "Major Update");

        release.name = Some(String::new());
        assert_eq!(release.display_name(), "v1.0.0");

        release.name = None;
        assert_eq!(release.display_name(), "v1.0.0");
    }

    #[test]
    fn test_release_deserializes_with_null_fields() {
        let release: Release = serde_json::from_value(serde_json::json!({
            "tag_name": "v2.0.0",
            "name": null,
            "body": null,
            "html_url": "https://github.com/o/r/releases/tag/v2.0.0",
            "draft": false
        }))
        .unwrap();
        assert_eq!(release.name, None);
        assert_eq!(release.body, None);
    }

    #[test]
    fn test_payload_serializes_to_discord_shape() {
        let payload = DeliveryPayload::new(
            "GitHub Release",
            "https://example.com/a.png",
            "hello",
            Notification {
                title: "o/r".to_string(),
                url: "https://github.com/o/r".to_string(),
                color: 8950462,
                timestamp: "2024-01-01T00:00:00.000Z".to_string(),
                fields: vec![EmbedField::inline("Branch", "main")],
                footer: EmbedFooter {
                    text: "footer".to_string(),
                },
            },
        );

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["username"], "GitHub Release");
        assert_eq!(value["avatar_url"], "https://example.com/a.png");
        assert_eq!(value["content"], "hello");
        assert_eq!(value["embeds"][0]["color"], 8950462);
        assert_eq!(value["embeds"][0]["fields"][0]["name"], "Branch");
        assert_eq!(value["embeds"][0]["fields"][0]["inline"], true);
        assert_eq!(value["embeds"][0]["footer"]["text"], "footer");
    }
}
