//! Hacker News API client and the upstream provider seam.

pub mod client;
pub mod json;
pub mod models;

pub use client::HackerNewsApi;

use crate::models::{Story, StoryId};
use async_trait::async_trait;

/// Upstream source of best-story ids and story details.
///
/// Infallible by contract: implementations swallow and log transport or parse
/// failures, degrading to an empty list or an absent story. Callers treat
/// "fewer items than requested" as a normal condition.
#[async_trait]
pub trait StoryProvider: Send + Sync {
    /// Ranked ids of the current best stories. Empty on any failure.
    async fn best_story_ids(&self) -> Vec<StoryId>;

    /// Details for one story, or `None` when missing or unavailable.
    async fn story(&self, id: StoryId) -> Option<Story>;
}
