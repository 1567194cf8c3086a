//! Story resolution pipeline: cache-first lookups with concurrent upstream fan-out.

use crate::cache::StoryCache;
use crate::hn::StoryProvider;
use crate::models::{Story, StoryId};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves best-story ids and story details through the cache, falling back
/// to the upstream provider and healing the cache as data is fetched.
///
/// Holds no state of its own between calls; all caching lives in
/// [`StoryCache`]. Never returns an error: upstream failures surface only as
/// missing entries in the result.
#[derive(Clone)]
pub struct StoryService {
    provider: Arc<dyn StoryProvider>,
    cache: StoryCache,
}

impl StoryService {
    pub fn new(provider: Arc<dyn StoryProvider>, cache: StoryCache) -> Self {
        Self { provider, cache }
    }

    /// Top `count` best-story ids, served from cache when fresh.
    ///
    /// On a miss the full upstream list is stored unconditionally, even when
    /// it undershoots `count`; upstream failure degrades to an empty list.
    pub async fn best_story_ids(&self, count: usize) -> Vec<StoryId> {
        if let Some(ids) = self.cache.best_ids(count).await {
            return ids;
        }

        let ids = self.provider.best_story_ids().await;
        if ids.len() < count {
            warn!(
                requested = count,
                returned = ids.len(),
                "upstream returned fewer best-story ids than requested"
            );
        }
        self.cache.set_best_ids(ids.clone()).await;

        if ids.len() > count {
            ids[..count].to_vec()
        } else {
            ids
        }
    }

    /// Details for `ids`: cache hits resolve immediately, misses fan out as
    /// concurrent upstream fetches, one call per miss.
    ///
    /// Successful fetches are written back to the cache. Ids that fail to
    /// resolve are dropped from the result; every resolved id appears exactly
    /// once, in input order.
    pub async fn stories(&self, ids: Vec<StoryId>) -> Vec<Story> {
        let mut resolved: HashMap<StoryId, Story> = HashMap::with_capacity(ids.len());
        let mut fetches = Vec::new();

        for &id in &ids {
            if resolved.contains_key(&id) {
                continue;
            }
            if let Some(story) = self.cache.story(id) {
                resolved.insert(id, story);
                continue;
            }
            let provider = self.provider.clone();
            let cache = self.cache.clone();
            fetches.push(tokio::spawn(async move {
                let story = provider.story(id).await;
                if let Some(story) = &story {
                    cache.insert_story(id, story.clone());
                }
                (id, story)
            }));
        }

        // The single join point: every scheduled fetch completes before the merge.
        for joined in join_all(fetches).await {
            match joined {
                Ok((id, Some(story))) => {
                    resolved.insert(id, story);
                }
                Ok((id, None)) => debug!(id, "story unresolved, dropped from result"),
                Err(error) => warn!(error = ?error, "story fetch task failed"),
            }
        }

        let mut stories = Vec::with_capacity(resolved.len());
        for id in ids {
            if let Some(story) = resolved.remove(&id) {
                stories.push(story);
            }
        }
        stories
    }

    /// The consumer-facing operation: top `count` stories with details.
    pub async fn best_stories(&self, count: usize) -> Vec<Story> {
        let ids = self.best_story_ids(count).await;
        self.stories(ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted upstream that records every call it receives.
    struct FakeProvider {
        best: Vec<StoryId>,
        stories: HashMap<StoryId, Story>,
        list_calls: AtomicUsize,
        story_calls: Mutex<Vec<StoryId>>,
    }

    impl FakeProvider {
        fn new(best: Vec<StoryId>, stories: Vec<StoryId>) -> Arc<Self> {
            Arc::new(Self {
                best,
                stories: stories.into_iter().map(|id| (id, make_story(id))).collect(),
                list_calls: AtomicUsize::new(0),
                story_calls: Mutex::new(Vec::new()),
            })
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn story_calls_for(&self, id: StoryId) -> usize {
            self.story_calls
                .lock()
                .expect("story_calls lock poisoned")
                .iter()
                .filter(|&&called| called == id)
                .count()
        }
    }

    #[async_trait]
    impl StoryProvider for FakeProvider {
        async fn best_story_ids(&self) -> Vec<StoryId> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.best.clone()
        }

        async fn story(&self, id: StoryId) -> Option<Story> {
            self.story_calls
                .lock()
                .expect("story_calls lock poisoned")
                .push(id);
            self.stories.get(&id).cloned()
        }
    }

    fn make_story(id: StoryId) -> Story {
        Story {
            title: format!("Story {id}"),
            uri: format!("https://example.com/{id}"),
            posted_by: "tester".to_owned(),
            time: "2024-03-01T17:22:09+00:00".to_owned(),
            score: id as i64 * 10,
            comment_count: id as i64,
        }
    }

    fn service_with(provider: Arc<FakeProvider>) -> StoryService {
        StoryService::new(provider, StoryCache::new(Some("-1".to_owned())))
    }

    #[tokio::test]
    async fn cold_cache_fetches_list_once_and_slices() {
        let provider = FakeProvider::new(vec![5, 3, 1, 9, 7], vec![]);
        let service = service_with(provider.clone());

        assert_eq!(service.best_story_ids(3).await, vec![5, 3, 1]);
        assert_eq!(provider.list_calls(), 1);

        // Warm cache: same slice, no second upstream call.
        assert_eq!(service.best_story_ids(3).await, vec![5, 3, 1]);
        assert_eq!(provider.list_calls(), 1);
    }

    #[tokio::test]
    async fn undersized_upstream_list_is_stored_and_returned() {
        let provider = FakeProvider::new(vec![1, 2], vec![]);
        let service = service_with(provider.clone());

        assert_eq!(service.best_story_ids(5).await, vec![1, 2]);
        assert_eq!(provider.list_calls(), 1);

        // The stored list is too short for the same request, so the cache
        // misses again and upstream is consulted a second time.
        assert_eq!(service.best_story_ids(5).await, vec![1, 2]);
        assert_eq!(provider.list_calls(), 2);

        // A request the stored list can satisfy is a pure cache hit.
        assert_eq!(service.best_story_ids(2).await, vec![1, 2]);
        assert_eq!(provider.list_calls(), 2);
    }

    #[tokio::test]
    async fn failed_list_fetch_degrades_to_empty() {
        let provider = FakeProvider::new(vec![], vec![]);
        let service = service_with(provider.clone());

        assert!(service.best_story_ids(3).await.is_empty());
        assert_eq!(provider.list_calls(), 1);
    }

    #[tokio::test]
    async fn cached_ids_skip_upstream_entirely() {
        let provider = FakeProvider::new(vec![], vec![]);
        let service = service_with(provider.clone());
        service.cache.set_best_ids(vec![4, 2]).await;

        assert_eq!(service.best_story_ids(2).await, vec![4, 2]);
        assert_eq!(provider.list_calls(), 0);
    }

    #[tokio::test]
    async fn stories_partition_hits_and_misses() {
        let provider = FakeProvider::new(vec![], vec![11, 12, 13]);
        let service = service_with(provider.clone());
        service.cache.insert_story(11, make_story(11));

        let stories = service.stories(vec![11, 12, 13]).await;
        assert_eq!(
            stories,
            vec![make_story(11), make_story(12), make_story(13)]
        );

        // The hit never reached upstream; each miss cost exactly one call.
        assert_eq!(provider.story_calls_for(11), 0);
        assert_eq!(provider.story_calls_for(12), 1);
        assert_eq!(provider.story_calls_for(13), 1);

        // Fetched misses were written back to the cache.
        assert_eq!(service.cache.story(12), Some(make_story(12)));
        assert_eq!(service.cache.story(13), Some(make_story(13)));
    }

    #[tokio::test]
    async fn unresolved_ids_are_dropped_from_the_result() {
        // 21 resolves, 22 is absent upstream.
        let provider = FakeProvider::new(vec![], vec![21]);
        let service = service_with(provider.clone());

        let stories = service.stories(vec![21, 22]).await;
        assert_eq!(stories, vec![make_story(21)]);

        assert_eq!(provider.story_calls_for(22), 1);
        assert_eq!(service.cache.story(22), None);
    }

    #[tokio::test]
    async fn stories_preserve_input_order() {
        let provider = FakeProvider::new(vec![], vec![1, 2, 3]);
        let service = service_with(provider);
        let stories = service.stories(vec![3, 1, 2]).await;
        assert_eq!(stories, vec![make_story(3), make_story(1), make_story(2)]);
    }

    #[tokio::test]
    async fn second_resolution_is_served_from_cache() {
        let provider = FakeProvider::new(vec![], vec![31, 32]);
        let service = service_with(provider.clone());

        service.stories(vec![31, 32]).await;
        service.stories(vec![31, 32]).await;

        assert_eq!(provider.story_calls_for(31), 1);
        assert_eq!(provider.story_calls_for(32), 1);
    }

    #[tokio::test]
    async fn best_stories_composes_both_stages() {
        let provider = FakeProvider::new(vec![5, 3, 1, 9, 7], vec![5, 3, 1, 9, 7]);
        let service = service_with(provider.clone());

        let stories = service.best_stories(3).await;
        assert_eq!(stories, vec![make_story(5), make_story(3), make_story(1)]);
        assert_eq!(provider.list_calls(), 1);

        // Warm pass: no further upstream traffic at all.
        let stories = service.best_stories(3).await;
        assert_eq!(stories, vec![make_story(5), make_story(3), make_story(1)]);
        assert_eq!(provider.list_calls(), 1);
        assert_eq!(provider.story_calls_for(5), 1);
        assert_eq!(provider.story_calls_for(3), 1);
        assert_eq!(provider.story_calls_for(1), 1);
    }
}
