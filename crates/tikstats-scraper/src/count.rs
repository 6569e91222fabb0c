//! Normalization of abbreviated count tokens such as `"12.3K"` or `"4M"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScraperError;

static THOUSANDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?[Kk]$").expect("valid thousands regex"));
static MILLIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?[Mm]$").expect("valid millions regex"));

/// Converts a count token into a float.
///
/// - `"12.3K"` / `"12.3k"` → `12300.0`
/// - `"4M"` / `"4m"` → `4000000.0`
/// - `"42"` → `42.0`
/// - `""` → `0.0`
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidCount`] for anything else, including
/// unknown suffixes (`"3B"`), negative numbers, and non-finite literals such as
/// `"inf"` or `"NaN"` that `f64::from_str` would otherwise accept.
pub fn parse_count(token: &str) -> Result<f64, ScraperError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(0.0);
    }

    let (number, scale) = if THOUSANDS_RE.is_match(token) {
        (&token[..token.len() - 1], 1_000.0)
    } else if MILLIONS_RE.is_match(token) {
        (&token[..token.len() - 1], 1_000_000.0)
    } else {
        (token, 1.0)
    };

    let invalid = || ScraperError::InvalidCount {
        token: token.to_owned(),
    };
    let value = number.parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value.is_sign_negative() {
        return Err(invalid());
    }

    Ok(value * scale)
}

/// [`parse_count`] truncated toward zero to a whole count.
///
/// # Errors
///
/// Same as [`parse_count`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_count_u64(token: &str) -> Result<u64, ScraperError> {
    // Non-negative and finite by construction; `as` saturates above u64::MAX.
    parse_count(token).map(|value| value.trunc() as u64)
}

#[cfg(test)]
#[path = "count_test.rs"]
mod tests;
