//! Derived profile metrics.
//!
//! Monetization thresholds are fixed: 100,000 total views and 10,000
//! followers. Every ratio divides by either the video count or the total view
//! count, so both must be non-zero.

use serde::Serialize;
use thiserror::Error;

use crate::profile::ProfileStats;

pub const MONETIZATION_VIEWS_THRESHOLD: f64 = 100_000.0;
pub const MONETIZATION_FOLLOWERS_THRESHOLD: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KpiError {
    #[error("cannot compute per-video KPIs: profile has no videos")]
    NoVideos,

    #[error("cannot compute per-view KPIs: profile has zero total views")]
    NoViews,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSet {
    pub monetization_views_remaining: f64,
    pub monetization_followers_remaining: f64,
    pub monetization_views_percentage_completed: f64,
    pub monetization_followers_percentage_completed: f64,
    pub views_per_video: f64,
    pub likes_per_video: f64,
    pub likes_per_view: f64,
    pub followers_per_view: f64,
}

impl KpiSet {
    /// Computes all eight KPIs from `stats`.
    ///
    /// # Errors
    ///
    /// - [`KpiError::NoVideos`] when `stats.videos` is empty.
    /// - [`KpiError::NoViews`] when `stats.views` is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(stats: &ProfileStats) -> Result<Self, KpiError> {
        if stats.videos.is_empty() {
            return Err(KpiError::NoVideos);
        }
        if stats.views == 0 {
            return Err(KpiError::NoViews);
        }

        let views = stats.views as f64;
        let followers = stats.followers as f64;
        let likes = stats.likes as f64;
        let video_count = stats.videos.len() as f64;

        Ok(Self {
            monetization_views_remaining: (MONETIZATION_VIEWS_THRESHOLD - views).max(0.0),
            monetization_followers_remaining: (MONETIZATION_FOLLOWERS_THRESHOLD - followers)
                .max(0.0),
            monetization_views_percentage_completed: (views / 1_000.0).min(100.0),
            monetization_followers_percentage_completed: (followers / 100.0).min(100.0),
            views_per_video: views / video_count,
            likes_per_video: likes / video_count,
            likes_per_view: likes / views,
            followers_per_view: followers / views,
        })
    }
}
