pub mod client;
pub mod count;
pub mod error;
pub mod extract;

use tikstats_core::ProfileSnapshot;

pub use client::ProfileClient;
pub use count::{parse_count, parse_count_u64};
pub use error::ScraperError;
pub use extract::{
    detect_strategy, extract_profile_stats, extract_profile_stats_with, ExtractionStrategy,
    MarkupStrategy, SummaryTextStrategy,
};

/// Parses already-fetched profile HTML into a [`ProfileSnapshot`].
///
/// # Errors
///
/// Extraction errors from [`extract_profile_stats`], or
/// [`ScraperError::Kpi`] when the page has no videos or zero total views.
pub fn parse_profile_page(html: &str) -> Result<ProfileSnapshot, ScraperError> {
    let stats = extract_profile_stats(html)?;
    Ok(ProfileSnapshot::from_stats(stats)?)
}

/// Fetches `username`'s profile page and parses it into a [`ProfileSnapshot`].
///
/// # Errors
///
/// Any error from [`ProfileClient::fetch_profile_page`] or
/// [`parse_profile_page`], unchanged.
pub async fn scrape_profile(
    client: &ProfileClient,
    username: &str,
) -> Result<ProfileSnapshot, ScraperError> {
    let html = client.fetch_profile_page(username).await?;
    parse_profile_page(&html)
}
