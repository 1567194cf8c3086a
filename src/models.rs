//! Domain model for stories served by the API.

use serde::{Deserialize, Serialize};

/// Opaque Hacker News item identifier.
pub type StoryId = u64;

/// A story as returned to API consumers.
///
/// Immutable after construction. Normalized from the raw upstream shape:
/// missing text fields collapse to empty strings, missing numerics to zero,
/// and the timestamp is an ISO-8601 string with offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub title: String,
    pub uri: String,
    pub posted_by: String,
    /// When the story was posted, e.g. `2024-03-01T17:22:09+00:00`.
    pub time: String,
    pub score: i64,
    pub comment_count: i64,
}
