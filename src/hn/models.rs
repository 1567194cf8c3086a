//! Raw item shape returned by the Hacker News API.

use crate::models::Story;
use chrono::{DateTime, TimeDelta};
use serde::Deserialize;

/// An item as returned by `item/{id}.json`, before normalization.
///
/// Every field may be absent; conversion into [`Story`] substitutes empty
/// strings and zeroes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStory {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub by: Option<String>,
    /// Posting time in Unix seconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub score: Option<i64>,
    /// Total comment count.
    #[serde(default)]
    pub descendants: Option<i64>,
}

impl From<RawStory> for Story {
    fn from(raw: RawStory) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            uri: raw.url.unwrap_or_default(),
            posted_by: raw.by.unwrap_or_default(),
            time: format_posted_at(raw.time),
            score: raw.score.unwrap_or(0),
            comment_count: raw.descendants.unwrap_or(0),
        }
    }
}

/// Normalize upstream Unix seconds to an ISO-8601 string with offset.
///
/// Absent or out-of-range values fall back to one second past the epoch.
fn format_posted_at(seconds: Option<i64>) -> String {
    let posted_at = seconds
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .unwrap_or(DateTime::UNIX_EPOCH + TimeDelta::seconds(1));
    posted_at.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
