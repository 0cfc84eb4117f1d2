//! Embed builder — turns an event context into a Discord embed.
//!
//! Push-like events render repository, branch and commit. Published releases
//! render optional release notes, repository and version.

use chrono::{DateTime, SecondsFormat, Utc};

use herald_common::types::{EmbedField, EmbedFooter, EventContext, Notification, Release};

use crate::format::{RELEASE_NOTES_LIMIT, ref_name, short_sha, truncate};

/// How an event is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode<'a> {
    /// A published release.
    Release(&'a Release),
    /// Any other event, rendered with branch and commit.
    Push { branch: &'a str, sha: &'a str },
}

/// Pick the rendering for an event.
///
/// Only a `release` event that actually carries a release payload renders as
/// a release; everything else is push-like.
pub fn classify(ctx: &EventContext) -> RenderMode<'_> {
    match &ctx.release {
        Some(release) if ctx.event_name == "release" => RenderMode::Release(release),
        _ => RenderMode::Push {
            branch: ref_name(&ctx.git_ref),
            sha: &ctx.sha,
        },
    }
}

/// `Release {tag}: {name}`, falling back to the tag when the name is blank.
pub fn release_title(release: &Release) -> String {
    format!("Release {}: {}", release.tag_name, release.display_name())
}

fn repository_field(ctx: &EventContext) -> EmbedField {
    EmbedField::inline(
        "Repository",
        format!("[{}]({})", ctx.full_name(), ctx.repo_url()),
    )
}

/// Build the embed for an event.
pub fn build_notification(
    ctx: &EventContext,
    mode: &RenderMode<'_>,
    color: u32,
    footer: &str,
    now: DateTime<Utc>,
) -> Notification {
    let (title, url, fields) = match mode {
        RenderMode::Push { branch, sha } => {
            let fields = vec![
                repository_field(ctx),
                EmbedField::inline("Branch", *branch),
                EmbedField::inline(
                    "Commit",
                    format!("[`{}`]({})", short_sha(sha), ctx.commit_url()),
                ),
            ];
            (ctx.full_name(), ctx.repo_url(), fields)
        }
        RenderMode::Release(release) => {
            let mut fields = Vec::with_capacity(3);
            if let Some(body) = release.body.as_deref()
                && !body.is_empty()
            {
                fields.push(EmbedField::block(
                    "Release Notes",
                    format!(
                        "{}\n\n[Read more]({})",
                        truncate(body, RELEASE_NOTES_LIMIT),
                        release.html_url
                    ),
                ));
            }
            fields.push(repository_field(ctx));
            fields.push(EmbedField::inline("Version", release.tag_name.as_str()));
            (release_title(release), release.html_url.clone(), fields)
        }
    };

    Notification {
        title,
        url,
        color,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        fields,
        footer: EmbedFooter {
            text: footer.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use herald_common::types::DEFAULT_SERVER_URL;

    fn push_context() -> EventContext {
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

    fn release(tag: &str, name: Option<&str>, body: Option<&str>) -> Release {
        Release {
            tag_name: tag.to_string(),
            name: name.map(str::to_string),
            body: body.map(str::to_string),
            html_url: format!("https://github.com/lettermint/test-repo/releases/tag/{tag}"),
        }
    }

    fn release_context(release: Release) -> EventContext {
        EventContext {
            git_ref: format!("refs/tags/{}", release.tag_name),
            event_name: "release".to_string(),
            release: Some(release),
            ..push_context()
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_classify_release() {
        let ctx = release_context(release("v1.0.0", None, None));
        assert!(matches!(classify(&ctx), RenderMode::Release(r) if r.tag_name == "v1.0.0"));
    }

    #[test]
    fn test_classify_push() {
        let ctx = push_context();
        assert_eq!(
            classify(&ctx),
            RenderMode::Push {
                branch: "main",
                sha: "abc123def456789"
            }
        );
    }

    #[test]
    fn test_classify_release_event_without_payload_is_push() {
        let ctx = EventContext {
            event_name: "release".to_string(),
            ..push_context()
        };
        assert!(matches!(classify(&ctx), RenderMode::Push { .. }));
    }

    #[test]
    fn test_classify_payload_on_other_event_is_push() {
        let ctx = EventContext {
            event_name: "workflow_dispatch".to_string(),
            ..release_context(release("v1.0.0", None, None))
        };
        assert!(matches!(classify(&ctx), RenderMode::Push { .. }));
    }

    #[test]
    fn test_release_title() {
        assert_eq!(
            release_title(&release("v1.0.0", Some("Major Update"), None)),
            "Release v1.0.0: Major Update"
        );
        assert_eq!(
            release_title(&release("v2.0.0", None, None)),
            "Release v2.0.0: v2.0.0"
        );
    }

    #[test]
    fn test_push_notification() {
        let ctx = push_context();
        let mode = classify(&ctx);
        let n = build_notification(&ctx, &mode, 8950462, "footer text", fixed_now());

        assert_eq!(n.title, "lettermint/test-repo");
        assert_eq!(n.url, "https://github.com/lettermint/test-repo");
        assert_eq!(n.color, 8950462);
        assert_eq!(n.timestamp, "2024-05-01T12:30:00.000Z");
        assert_eq!(n.footer.text, "footer text");

        let names: Vec<&str> = n.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Repository", "Branch", "Commit"]);
        assert!(n.fields.iter().all(|f| f.inline));
        assert_eq!(
            n.fields[0].value,
            "[lettermint/test-repo](https://github.com/lettermint/test-repo)"
        );
        assert_eq!(n.fields[1].value, "main");
        assert_eq!(
            n.fields[2].value,
            "[`abc123d`](https://github.com/lettermint/test-repo/commit/abc123def456789)"
        );
    }

    #[test]
    fn test_release_notification_with_notes() {
        let ctx = release_context(release("v1.0.0", Some("Major Update"), Some("Bug fixes")));
        let mode = classify(&ctx);
        let n = build_notification(&ctx, &mode, 0, "f", fixed_now());

        assert_eq!(n.title, "Release v1.0.0: Major Update");
        assert_eq!(
            n.url,
            "https://github.com/lettermint/test-repo/releases/tag/v1.0.0"
        );

        let names: Vec<&str> = n.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Release Notes", "Repository", "Version"]);
        assert!(!n.fields[0].inline);
        assert_eq!(
            n.fields[0].value,
            "Bug fixes\n\n[Read more](https://github.com/lettermint/test-repo/releases/tag/v1.0.0)"
        );
        assert!(n.fields[1].inline);
        assert_eq!(n.fields[2].value, "v1.0.0");
    }

    #[test]
    fn test_release_notification_without_notes() {
        for body in [None, Some("")] {
            let ctx = release_context(release("v2.0.0", None, body));
            let n = build_notification(&ctx, &classify(&ctx), 0, "f", fixed_now());

            assert_eq!(n.title, "Release v2.0.0: v2.0.0");
            let names: Vec<&str> = n.fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, ["Repository", "Version"]);
        }
    }

    #[test]
    fn test_release_notes_are_truncated() {
        let body = "word ".repeat(100);
        let ctx = release_context(release("v3.0.0", None, Some(&body)));
        let n = build_notification(&ctx, &classify(&ctx), 0, "f", fixed_now());

        let (notes, link) = n.fields[0].value.split_once("\n\n").unwrap();
        assert!(notes.ends_with("..."));
        assert!(notes.chars().count() <= RELEASE_NOTES_LIMIT + 3);
        assert!(link.starts_with("[Read more]("));
    }
}
