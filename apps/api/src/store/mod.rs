//! Content store seam. The page tree, user profiles and site settings live
//! outside this service; the listing code only talks to them through
//! [`ContentStore`].
//!
//! `AppState` holds an `Arc<dyn ContentStore>`: Postgres in production,
//! in-memory for tests and database-less local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::editorial::trending::TrendingState;
use crate::models::article::Article;
use crate::models::site::{SiteCustomization, SupportSection, VideoShort};
use crate::models::user::UserProfile;

pub use memory::MemoryContentStore;
pub use postgres::PgContentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// How a scope picks its candidates out of the article universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    /// Pages strictly below a tree path (home page, support sections).
    DescendantOf(String),
    /// Exact category-key match (section pages).
    SectionKey(String),
}

impl CandidateFilter {
    /// Live articles only; drafts are never candidates.
    pub fn matches(&self, article: &Article) -> bool {
        if !article.is_live {
            return false;
        }
        match self {
            CandidateFilter::DescendantOf(path) => article.is_descendant_of(path),
            CandidateFilter::SectionKey(key) => article.section == *key,
        }
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_live_articles(&self, filter: &CandidateFilter) -> Result<Vec<Article>, StoreError>;

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, StoreError>;

    async fn get_subscriber_profile(&self, user_id: Uuid)
        -> Result<Option<UserProfile>, StoreError>;

    async fn get_site_customization(&self) -> Result<Option<SiteCustomization>, StoreError>;

    async fn list_featured_videos(&self, limit: usize) -> Result<Vec<VideoShort>, StoreError>;

    async fn find_support_section(&self, slug: &str) -> Result<Option<SupportSection>, StoreError>;

    /// Single conditional write, applied only if the article was never
    /// published before: flips it live, stamps `first_published_at` and, unless
    /// an editor already chose a trending state, arms `now + window` (see
    /// [`crate::editorial::trending::on_first_publish`]). Returns the article
    /// only to the caller whose write performed the transition.
    async fn mark_first_published(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<Option<Article>, StoreError>;

    /// Editor write: atomic update of the trending fields that also sets
    /// `trending_set_by_editor`. Returns the updated article, or `None` when
    /// the id is unknown.
    async fn persist_trending_state(
        &self,
        id: Uuid,
        state: TrendingState,
    ) -> Result<Option<Article>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::article::fixtures::article;

    #[test]
    fn test_drafts_never_match() {
        let mut a = article("rascunho", Utc::now());
        a.is_live = false;
        assert!(!CandidateFilter::SectionKey("economia".into()).matches(&a));
        assert!(!CandidateFilter::DescendantOf("/home/".into()).matches(&a));
    }

    #[test]
    fn test_section_filter_is_exact() {
        let a = article("juros", Utc::now());
        assert!(CandidateFilter::SectionKey("economia".into()).matches(&a));
        assert!(!CandidateFilter::SectionKey("eco".into()).matches(&a));
    }
}
