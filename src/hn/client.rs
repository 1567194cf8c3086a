//! [`StoryProvider`] implementation backed by the public Hacker News API.

use super::StoryProvider;
use super::json::parse_json_with_path;
use super::models::RawStory;
use crate::models::{Story, StoryId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, error};

/// Base URL of the Hacker News Firebase API.
pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// HTTP client for the Hacker News API.
///
/// The fallible fetch helpers return `Result`; the [`StoryProvider`] impl is
/// the swallow-and-log boundary that converts failures to absence.
pub struct HackerNewsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HackerNewsApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("request to {url} returned {status}");
        }
        response
            .text()
            .await
            .with_context(|| format!("reading body from {url} failed"))
    }

    async fn fetch_best_story_ids(&self) -> Result<Vec<StoryId>> {
        let body = self.get_text("beststories.json").await?;
        parse_json_with_path(&body).context("parsing beststories.json response")
    }

    async fn fetch_story(&self, id: StoryId) -> Result<Option<Story>> {
        let body = self.get_text(&format!("item/{id}.json")).await?;
        // The API answers unknown items with a 200 and a literal `null` body.
        let raw: Option<RawStory> = parse_json_with_path(&body)
            .with_context(|| format!("parsing item/{id}.json response"))?;
        Ok(raw.map(Story::from))
    }
}

#[async_trait]
impl StoryProvider for HackerNewsApi {
    async fn best_story_ids(&self) -> Vec<StoryId> {
        match self.fetch_best_story_ids().await {
            Ok(ids) => {
                debug!(count = ids.len(), "fetched best-story ids from upstream");
                ids
            }
            Err(error) => {
                error!(error = ?error, "failed to fetch best-story ids, treating as empty");
                Vec::new()
            }
        }
    }

    async fn story(&self, id: StoryId) -> Option<Story> {
        match self.fetch_story(id).await {
            Ok(Some(story)) => Some(story),
            Ok(None) => {
                debug!(id, "story not present upstream");
                None
            }
            Err(error) => {
                error!(id, error = ?error, "failed to fetch story");
                None
            }
        }
    }
}
