//! Profile page extraction.
//!
//! The three headline counts (following, followers, likes) are read by one of
//! two [`ExtractionStrategy`] implementations, picked by [`detect_strategy`]
//! from the markers present on the page:
//!
//! - [`MarkupStrategy`] reads `strong[data-e2e="…-count"]` elements.
//! - [`SummaryTextStrategy`] runs regexes over the page's summary phrase
//!   (`"12.3K Followers, 45 Following, 1.2M Likes"`).
//!
//! Per-video view counts and post titles are read the same way for both.

mod markup;
mod summary;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tikstats_core::{ProfileStats, VideoViews};

use crate::count::parse_count_u64;
use crate::error::ScraperError;

pub use markup::MarkupStrategy;
pub use summary::SummaryTextStrategy;

pub(crate) const FOLLOWERS_MARKER: &str = "followers-count";
const VIDEO_VIEWS_MARKER: &str = "video-views";
const POST_DESC_MARKER: &str = "user-post-item-desc";
const POST_LINK_MARKER: &str = "user-post-item-desc a";

pub(crate) static FOLLOWERS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"strong[data-e2e="followers-count"]"#).expect("valid followers selector")
});
static VIDEO_VIEWS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"strong.video-count[data-e2e="video-views"]"#)
        .expect("valid video views selector")
});
static POST_DESC_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-e2e="user-post-item-desc"]"#).expect("valid post selector")
});
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid link selector"));

/// Headline counts read by an [`ExtractionStrategy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    pub following: u64,
    pub followers: u64,
    pub likes: u64,
}

/// One way of reading the headline counts off a parsed profile page.
pub trait ExtractionStrategy {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Reads following, follower and like counts from `document`.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see each strategy.
    fn summary_counts(&self, document: &Html) -> Result<SummaryCounts, ScraperError>;
}

static MARKUP: MarkupStrategy = MarkupStrategy;
static SUMMARY_TEXT: SummaryTextStrategy = SummaryTextStrategy;

/// Picks [`MarkupStrategy`] when the follower-count element is present, and
/// [`SummaryTextStrategy`] otherwise.
#[must_use]
pub fn detect_strategy(document: &Html) -> &'static dyn ExtractionStrategy {
    if document.select(&FOLLOWERS_SELECTOR).next().is_some() {
        &MARKUP
    } else {
        &SUMMARY_TEXT
    }
}

/// Extracts [`ProfileStats`] from raw profile HTML using the detected strategy.
///
/// Pure function of `html`.
///
/// # Errors
///
/// - [`ScraperError::MarkerNotFound`] when view counts, post descriptions, or
///   (for the markup strategy) a headline count element is missing.
/// - [`ScraperError::InvalidCount`] when a count token cannot be parsed.
pub fn extract_profile_stats(html: &str) -> Result<ProfileStats, ScraperError> {
    let document = Html::parse_document(html);
    let strategy = detect_strategy(&document);
    stats_from_document(&document, strategy)
}

/// Like [`extract_profile_stats`] but with a caller-chosen strategy.
///
/// # Errors
///
/// Same as [`extract_profile_stats`].
pub fn extract_profile_stats_with(
    html: &str,
    strategy: &dyn ExtractionStrategy,
) -> Result<ProfileStats, ScraperError> {
    let document = Html::parse_document(html);
    stats_from_document(&document, strategy)
}

fn stats_from_document(
    document: &Html,
    strategy: &dyn ExtractionStrategy,
) -> Result<ProfileStats, ScraperError> {
    let counts = strategy.summary_counts(document)?;
    let view_counts = extract_view_counts(document)?;
    let titles = extract_post_titles(document)?;

    let views = view_counts
        .iter()
        .try_fold(0u64, |total, &count| total.checked_add(count))
        .ok_or(ScraperError::ViewCountOverflow)?;
    let videos = pair_titles_with_views(titles, &view_counts);

    tracing::debug!(
        strategy = strategy.name(),
        following = counts.following,
        followers = counts.followers,
        likes = counts.likes,
        views,
        videos = videos.len(),
        "extracted profile stats"
    );

    Ok(ProfileStats {
        following: counts.following,
        followers: counts.followers,
        likes: counts.likes,
        views,
        videos,
    })
}

/// Parses every `strong.video-count[data-e2e="video-views"]` in page order.
fn extract_view_counts(document: &Html) -> Result<Vec<u64>, ScraperError> {
    let counts = document
        .select(&VIDEO_VIEWS_SELECTOR)
        .map(|el| parse_count_u64(&element_text(&el)))
        .collect::<Result<Vec<_>, _>>()?;

    if counts.is_empty() {
        return Err(ScraperError::MarkerNotFound {
            marker: VIDEO_VIEWS_MARKER,
        });
    }
    Ok(counts)
}

/// Returns the text of the first link inside each post description element.
fn extract_post_titles(document: &Html) -> Result<Vec<String>, ScraperError> {
    let titles = document
        .select(&POST_DESC_SELECTOR)
        .map(|post| {
            post.select(&LINK_SELECTOR)
                .next()
                .map(|link| element_text(&link))
                .ok_or(ScraperError::MarkerNotFound {
                    marker: POST_LINK_MARKER,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if titles.is_empty() {
        return Err(ScraperError::MarkerNotFound {
            marker: POST_DESC_MARKER,
        });
    }
    Ok(titles)
}

/// Pairs titles with view counts by position.
///
/// Nothing ties a title to its view count except document order, so a layout
/// that renders the two lists in different orders silently mismatches them.
/// Pairing stops at the shorter list. Repeated titles keep the later count.
#[must_use]
pub fn pair_titles_with_views(titles: Vec<String>, views: &[u64]) -> VideoViews {
    if titles.len() != views.len() {
        tracing::debug!(
            titles = titles.len(),
            view_counts = views.len(),
            "title and view-count lists differ in length; dropping unpaired entries"
        );
    }
    titles.into_iter().zip(views.iter().copied()).collect()
}

pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
