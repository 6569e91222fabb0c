use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{
    element_text, ExtractionStrategy, SummaryCounts, FOLLOWERS_MARKER, FOLLOWERS_SELECTOR,
};
use crate::count::parse_count_u64;
use crate::error::ScraperError;

const FOLLOWING_MARKER: &str = "following-count";
const LIKES_MARKER: &str = "likes-count";

static FOLLOWING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"strong[data-e2e="following-count"]"#).expect("valid following selector")
});
static LIKES_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"strong[data-e2e="likes-count"]"#).expect("valid likes selector")
});

/// Reads the headline counts from `strong[data-e2e="…-count"]` elements.
///
/// Every element is required: a missing one means the layout changed, and the
/// strategy fails with [`ScraperError::MarkerNotFound`] instead of guessing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupStrategy;

impl ExtractionStrategy for MarkupStrategy {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn summary_counts(&self, document: &Html) -> Result<SummaryCounts, ScraperError> {
        Ok(SummaryCounts {
            following: marked_count(document, &FOLLOWING_SELECTOR, FOLLOWING_MARKER)?,
            followers: marked_count(document, &FOLLOWERS_SELECTOR, FOLLOWERS_MARKER)?,
            likes: marked_count(document, &LIKES_SELECTOR, LIKES_MARKER)?,
        })
    }
}

fn marked_count(
    document: &Html,
    selector: &Selector,
    marker: &'static str,
) -> Result<u64, ScraperError> {
    let element = document
        .select(selector)
        .next()
        .ok_or(ScraperError::MarkerNotFound { marker })?;
    parse_count_u64(&element_text(&element))
}
