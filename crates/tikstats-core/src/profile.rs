//! Profile statistics as extracted from one page load.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::kpi::{KpiError, KpiSet};

/// Ordered title → view-count mapping.
///
/// Titles are not guaranteed unique. Inserting a title that is already present
/// replaces its count but keeps the entry at its original position, so the
/// earlier count is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoViews {
    entries: Vec<(String, u64)>,
}

impl VideoViews {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the count for `title`, returning the previous count
    /// when the title was already present.
    pub fn insert(&mut self, title: impl Into<String>, views: u64) -> Option<u64> {
        let title = title.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(t, _)| *t == title) {
            return Some(std::mem::replace(existing, views));
        }
        self.entries.push((title, views));
        None
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, v)| *v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), *v))
    }
}

impl<T: Into<String>> FromIterator<(T, u64)> for VideoViews {
    fn from_iter<I: IntoIterator<Item = (T, u64)>>(iter: I) -> Self {
        let mut videos = Self::new();
        for (title, views) in iter {
            videos.insert(title, views);
        }
        videos
    }
}

impl Serialize for VideoViews {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, views) in &self.entries {
            map.serialize_entry(title, views)?;
        }
        map.end()
    }
}

/// Raw counts read off a profile page, before any ratios are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    pub following: u64,
    pub followers: u64,
    pub likes: u64,
    /// Sum over every discovered video, including any that could not be
    /// paired with a title.
    pub views: u64,
    pub videos: VideoViews,
}

/// Result of one fetch+parse cycle: the raw counts plus their KPIs.
///
/// Built once by value from [`ProfileStats`]; there is no way to obtain a
/// snapshot whose `kpis` were not computed from its own counts.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProfileSnapshot {
    pub following: u64,
    pub followers: u64,
    pub likes: u64,
    pub views: u64,
    pub videos: VideoViews,
    pub kpis: KpiSet,
}

impl ProfileSnapshot {
    /// Computes the KPI set for `stats` and moves the stats into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`KpiError`] when the stats have no videos or zero total views.
    pub fn from_stats(stats: ProfileStats) -> Result<Self, KpiError> {
        let kpis = KpiSet::compute(&stats)?;
        let ProfileStats {
            following,
            followers,
            likes,
            views,
            videos,
        } = stats;
        Ok(Self {
            following,
            followers,
            likes,
            views,
            videos,
            kpis,
        })
    }
}
