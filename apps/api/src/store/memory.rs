use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::editorial::trending::{on_first_publish, TrendingState};
use crate::models::article::Article;
use crate::models::site::{SiteCustomization, SupportSection, VideoShort};
use crate::models::user::UserProfile;
use crate::store::{CandidateFilter, ContentStore, StoreError};

#[derive(Default)]
struct Inner {
    articles: HashMap<Uuid, Article>,
    profiles: HashMap<Uuid, UserProfile>,
    customization: Option<SiteCustomization>,
    videos: Vec<VideoShort>,
    support_sections: Vec<SupportSection>,
}

/// In-process store. Every write goes through one `RwLock`, so the
/// first-publish check-and-set is atomic.
#[derive(Default)]
pub struct MemoryContentStore {
    inner: RwLock<Inner>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Seeding helpers for tests.
#[cfg(test)]
impl MemoryContentStore {
    pub async fn insert_article(&self, article: Article) {
        self.inner.write().await.articles.insert(article.id, article);
    }

    pub async fn insert_profile(&self, profile: UserProfile) {
        self.inner.write().await.profiles.insert(profile.user_id, profile);
    }

    pub async fn set_customization(&self, customization: SiteCustomization) {
        self.inner.write().await.customization = Some(customization);
    }

    pub async fn insert_video(&self, video: VideoShort) {
        self.inner.write().await.videos.push(video);
    }

    pub async fn insert_support_section(&self, section: SupportSection) {
        self.inner.write().await.support_sections.push(section);
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list_live_articles(&self, filter: &CandidateFilter) -> Result<Vec<Article>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .articles
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        Ok(self.inner.read().await.articles.get(&id).cloned())
    }

    async fn get_subscriber_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.inner.read().await.profiles.get(&user_id).cloned())
    }

    async fn get_site_customization(&self) -> Result<Option<SiteCustomization>, StoreError> {
        Ok(self.inner.read().await.customization.clone())
    }

    async fn list_featured_videos(&self, limit: usize) -> Result<Vec<VideoShort>, StoreError> {
        let inner = self.inner.read().await;
        let mut videos: Vec<VideoShort> =
            inner.videos.iter().filter(|v| v.is_featured).cloned().collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        videos.truncate(limit);
        Ok(videos)
    }

    async fn find_support_section(&self, slug: &str) -> Result<Option<SupportSection>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.support_sections.iter().find(|s| s.slug == slug).cloned())
    }

    async fn mark_first_published(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<Option<Article>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(article) = inner.articles.get_mut(&id) else {
            return Ok(None);
        };
        if article.first_published_at.is_some() {
            return Ok(None);
        }
        article.is_live = true;
        article.first_published_at = Some(now);
        if let Some(state) = on_first_publish(article, now, window) {
            let (is_trending, trending_until) = state.as_fields();
            article.is_trending = is_trending;
            article.trending_until = trending_until;
        }
        Ok(Some(article.clone()))
    }

    async fn persist_trending_state(
        &self,
        id: Uuid,
        state: TrendingState,
    ) -> Result<Option<Article>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(article) = inner.articles.get_mut(&id) else {
            return Ok(None);
        };
        let (is_trending, trending_until) = state.as_fields();
        article.is_trending = is_trending;
        article.trending_until = trending_until;
        article.trending_set_by_editor = true;
        Ok(Some(article.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::article::fixtures::article;

    #[tokio::test]
    async fn test_mark_first_published_only_once() {
        let window = Duration::hours(3);
        let store = MemoryContentStore::new();
        let mut draft = article("rascunho", Utc::now());
        draft.is_live = false;
        draft.first_published_at = None;
        let id = draft.id;
        store.insert_article(draft).await;

        let now = Utc::now();
        assert!(store.mark_first_published(id, now, window).await.unwrap().is_some());
        assert!(
            store
                .mark_first_published(id, now + Duration::minutes(5), window)
                .await
                .unwrap()
                .is_none(),
            "Second publish must not count as first"
        );
        let stored = store.get_article(id).await.unwrap().unwrap();
        assert!(stored.is_live);
        assert_eq!(stored.first_published_at, Some(now));
        assert!(stored.is_trending);
        assert_eq!(stored.trending_until, Some(now + window), "Window armed in the same write");
    }

    #[tokio::test]
    async fn test_first_publish_keeps_editor_trending_state() {
        let store = MemoryContentStore::new();
        let mut draft = article("editor", Utc::now());
        draft.is_live = false;
        draft.first_published_at = None;
        draft.trending_set_by_editor = true;
        let id = draft.id;
        store.insert_article(draft).await;

        let published = store
            .mark_first_published(id, Utc::now(), Duration::hours(3))
            .await
            .unwrap()
            .unwrap();
        assert!(published.is_live);
        assert!(!published.is_trending);
        assert_eq!(published.trending_until, None);
    }

    #[tokio::test]
    async fn test_featured_videos_newest_first_and_limited() {
        let store = MemoryContentStore::new();
        let now = Utc::now();
        for i in 0..6 {
            store
                .insert_video(VideoShort {
                    id: Uuid::new_v4(),
                    title: format!("video {i}"),
                    video_url: format!("https://videos.example/{i}"),
                    thumbnail_url: None,
                    is_featured: i != 5,
                    created_at: now - Duration::minutes(i),
                })
                .await;
        }
        let videos = store.list_featured_videos(4).await.unwrap();
        let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["video 0", "video 1", "video 2", "video 3"]);
    }
}
