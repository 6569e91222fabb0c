//! Username normalization and profile URL construction.

use crate::error::ScraperError;

const MAX_USERNAME_LEN: usize = 64;

/// Trims whitespace and a single leading `@`, then checks the remaining
/// handle only contains ASCII letters, digits, `_` and `.`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUsername`] when the handle is empty, too
/// long, or contains any other character.
pub fn normalize_username(raw: &str) -> Result<&str, ScraperError> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    let invalid = |reason: &str| ScraperError::InvalidUsername {
        username: raw.to_owned(),
        reason: reason.to_owned(),
    };

    if handle.is_empty() {
        return Err(invalid("username is empty"));
    }
    if handle.len() > MAX_USERNAME_LEN {
        return Err(invalid("username is longer than 64 characters"));
    }
    if !handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(invalid(
            "username may only contain letters, digits, '_' and '.'",
        ));
    }

    Ok(handle)
}

/// Builds `{base_url}/@{username}`, keeping any path prefix on `base_url`.
///
/// # Errors
///
/// - [`ScraperError::InvalidUsername`] if the username fails
///   [`normalize_username`].
/// - [`ScraperError::InvalidBaseUrl`] if `base_url` cannot carry a path.
pub fn profile_url(base_url: &str, username: &str) -> Result<String, ScraperError> {
    let handle = normalize_username(username)?;

    let invalid_base = |reason: String| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let mut url = reqwest::Url::parse(base_url).map_err(|e| invalid_base(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid_base("URL cannot be a base".to_owned()))?
        .pop_if_empty()
        .push(&format!("@{handle}"));

    Ok(url.to_string())
}
