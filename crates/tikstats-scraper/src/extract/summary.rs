use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{ExtractionStrategy, SummaryCounts};
use crate::count::parse_count_u64;
use crate::error::ScraperError;

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("valid meta description selector")
});

// Thousands separators are allowed in the numeral ("1,234 Followers").
static FOLLOWING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*(?:\.\d+)?[KkMm]?)\s+Following\b").expect("valid following regex")
});
static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*(?:\.\d+)?[KkMm]?)\s+Followers\b").expect("valid followers regex")
});
static LIKES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*(?:\.\d+)?[KkMm]?)\s+Likes\b").expect("valid likes regex")
});

/// Reads the headline counts from the page's summary phrase, e.g.
/// `"12.3K Followers, 45 Following, 1.2M Likes"`.
///
/// The phrase is taken from `<meta name="description">` when present and from
/// the whole document text otherwise. A count whose phrase is absent is 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryTextStrategy;

impl ExtractionStrategy for SummaryTextStrategy {
    fn name(&self) -> &'static str {
        "summary-text"
    }

    fn summary_counts(&self, document: &Html) -> Result<SummaryCounts, ScraperError> {
        let text = summary_text(document);
        Ok(SummaryCounts {
            following: phrase_count(&text, &FOLLOWING_RE)?,
            followers: phrase_count(&text, &FOLLOWERS_RE)?,
            likes: phrase_count(&text, &LIKES_RE)?,
        })
    }
}

fn summary_text(document: &Html) -> String {
    document
        .select(&META_DESCRIPTION_SELECTOR)
        .find_map(|meta| meta.value().attr("content"))
        .map_or_else(
            || document.root_element().text().collect::<Vec<_>>().join(" "),
            str::to_owned,
        )
}

fn phrase_count(text: &str, re: &Regex) -> Result<u64, ScraperError> {
    match re.captures(text).and_then(|caps| caps.get(1)) {
        Some(token) => parse_count_u64(&token.as_str().replace(',', "")),
        None => Ok(0),
    }
}
