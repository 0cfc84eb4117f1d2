//! Small text helpers used when rendering embeds.

use herald_common::error::NotifyError;

/// Character limit for the release notes field.
pub const RELEASE_NOTES_LIMIT: usize = 300;

/// Parse a hex color such as `8892be` or `#8892be` into an RGB integer.
///
/// Rejects empty strings, non-hex characters and values above `0xFFFFFF`.
pub fn parse_hex_color(input: &str) -> Result<u32, NotifyError> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    // from_str_radix accepts a leading '+', which is not a hex digit
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(NotifyError::InvalidColor(input.to_string()));
    }

    match u32::from_str_radix(hex, 16) {
        Ok(color) if color <= 0xFF_FF_FF => Ok(color),
        _ => Err(NotifyError::InvalidColor(input.to_string())),
    }
}

/// Strip `refs/heads/` or `refs/tags/` from a ref. Other refs pass through.
pub fn ref_name(git_ref: &str) -> &str {
    git_ref
        .strip_prefix("refs/heads/")
        .or_else(|| git_ref.strip_prefix("refs/tags/"))
        .unwrap_or(git_ref)
}

/// First seven characters of a commit SHA.
pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(7) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// Shorten `text` to at most `limit` characters plus a trailing `...`.
///
/// Cuts at the last space inside the window when there is one past the
/// first character, otherwise exactly at `limit`.
pub fn truncate(text: &str, limit: usize) -> String {
    let window_end = match text.char_indices().nth(limit) {
        Some((idx, _)) => idx,
        None => return text.to_string(),
    };

    let window = &text[..window_end];
    let cut = match window.rfind(' ') {
        Some(pos) if pos > 0 => &window[..pos],
        _ => window,
    };

    format!("{cut}...")
}
