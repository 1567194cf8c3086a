//! Two-tier TTL cache for best-story ids and story details.
//!
//! Two independently expiring shapes share one retention policy: the ranked id
//! list lives behind a reader-writer lock and is only ever replaced wholesale,
//! while the per-id story map uses `DashMap` so writes to different ids never
//! contend. Expiry is evaluated at read time; stale entries linger until
//! overwritten.

pub mod retention;

use crate::models::{Story, StoryId};
use dashmap::DashMap;
use retention::RetentionPolicy;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Ranked id list plus the instant it was last fully replaced.
#[derive(Debug, Default)]
struct BestIds {
    ids: Vec<StoryId>,
    updated_at: Option<Instant>,
}

/// A cached story stamped with its insertion time.
#[derive(Debug)]
struct CachedStory {
    story: Story,
    created_at: Instant,
}

/// Shared story cache. Clone-cheap (all state behind one `Arc`).
#[derive(Clone)]
pub struct StoryCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    best_ids: RwLock<BestIds>,
    stories: DashMap<StoryId, CachedStory>,
    retention: RetentionPolicy,
}

impl StoryCache {
    /// Create an empty cache. `retention_raw` is the unparsed
    /// `CACHE_RETENTION_SECONDS` setting, resolved lazily on first read.
    pub fn new(retention_raw: Option<String>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                best_ids: RwLock::new(BestIds::default()),
                stories: DashMap::new(),
                retention: RetentionPolicy::new(retention_raw),
            }),
        }
    }

    /// First `count` best-story ids in stored order.
    ///
    /// Returns `None` when the list has never been set, has expired, or holds
    /// fewer than `count` ids. Callers treat all three identically; the log
    /// messages keep them distinguishable.
    pub async fn best_ids(&self, count: usize) -> Option<Vec<StoryId>> {
        let list = self.inner.best_ids.read().await;
        let Some(updated_at) = list.updated_at else {
            debug!("best-story id list has not been populated yet");
            return None;
        };
        if self.inner.retention.is_expired(updated_at) {
            info!("cached best-story id list has expired");
            return None;
        }
        if list.ids.len() < count {
            warn!(
                requested = count,
                cached = list.ids.len(),
                "fewer best-story ids in cache than requested"
            );
            return None;
        }
        debug!(count, "best-story ids served from cache");
        Some(list.ids[..count].to_vec())
    }

    /// Atomically replace the best-story id list and restamp it.
    ///
    /// Concurrent writers are serialized by the write lock; the last one to
    /// complete wins. Readers never observe a partially replaced list.
    pub async fn set_best_ids(&self, ids: Vec<StoryId>) {
        let mut list = self.inner.best_ids.write().await;
        list.ids = ids;
        list.updated_at = Some(Instant::now());
        debug!(count = list.ids.len(), "best-story ids stored in cache");
    }

    /// Cached story for `id`, or `None` when unknown or expired.
    ///
    /// Expired entries are not purged here; they stay until overwritten.
    pub fn story(&self, id: StoryId) -> Option<Story> {
        let Some(entry) = self.inner.stories.get(&id) else {
            debug!(id, "story not found in cache");
            return None;
        };
        if self.inner.retention.is_expired(entry.created_at) {
            debug!(id, "cached story has expired");
            return None;
        }
        debug!(id, "story served from cache");
        Some(entry.story.clone())
    }

    /// Insert or overwrite the story for `id`, restarting its freshness clock.
    pub fn insert_story(&self, id: StoryId, story: Story) {
        self.inner.stories.insert(
            id,
            CachedStory {
                story,
                created_at: Instant::now(),
            },
        );
        debug!(id, "story stored in cache");
    }
}
