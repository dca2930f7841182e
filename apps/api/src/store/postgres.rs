use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::editorial::trending::TrendingState;
use crate::models::article::Article;
use crate::models::site::{SiteCustomization, SupportSection, VideoShort};
use crate::models::user::UserProfile;
use crate::store::{CandidateFilter, ContentStore, StoreError};

/// Postgres-backed store over the `articles`, `user_profiles`,
/// `site_customizations`, `video_shorts` and `support_sections` tables.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn list_live_articles(&self, filter: &CandidateFilter) -> Result<Vec<Article>, StoreError> {
        let articles = match filter {
            CandidateFilter::DescendantOf(path) => {
                sqlx::query_as::<_, Article>(
                    r#"
                    SELECT * FROM articles
                    WHERE is_live
                      AND left(tree_path, length($1)) = $1
                      AND length(tree_path) > length($1)
                    "#,
                )
                .bind(path)
                .fetch_all(&self.pool)
                .await?
            }
            CandidateFilter::SectionKey(key) => {
                sqlx::query_as::<_, Article>(
                    "SELECT * FROM articles WHERE is_live AND section = $1",
                )
                .bind(key)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(articles)
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        Ok(
            sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_subscriber_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, StoreError> {
        Ok(
            sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_site_customization(&self) -> Result<Option<SiteCustomization>, StoreError> {
        Ok(sqlx::query_as::<_, SiteCustomization>(
            r#"
            SELECT heading_font, body_font, primary_color, secondary_color,
                   show_trending_section, show_video_section
            FROM site_customizations
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_featured_videos(&self, limit: usize) -> Result<Vec<VideoShort>, StoreError> {
        Ok(sqlx::query_as::<_, VideoShort>(
            "SELECT * FROM video_shorts WHERE is_featured ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_support_section(&self, slug: &str) -> Result<Option<SupportSection>, StoreError> {
        Ok(
            sqlx::query_as::<_, SupportSection>("SELECT * FROM support_sections WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn mark_first_published(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<Option<Article>, StoreError> {
        // The row lock serializes concurrent publishes; only one sees NULL.
        // Editor-set trending state is checked inside the same statement.
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET is_live = TRUE,
                first_published_at = $2,
                is_trending = CASE WHEN trending_set_by_editor THEN is_trending ELSE TRUE END,
                trending_until = CASE WHEN trending_set_by_editor THEN trending_until ELSE $3 END
            WHERE id = $1 AND first_published_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(now)
        .bind(now + window)
        .fetch_optional(&self.pool)
        .await?;

        if article.is_some() {
            info!("Article {id} published for the first time at {now}");
        }
        Ok(article)
    }

    async fn persist_trending_state(
        &self,
        id: Uuid,
        state: TrendingState,
    ) -> Result<Option<Article>, StoreError> {
        let (is_trending, trending_until) = state.as_fields();
        Ok(sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET is_trending = $2,
                trending_until = $3,
                trending_set_by_editor = TRUE
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(is_trending)
        .bind(trending_until)
        .fetch_optional(&self.pool)
        .await?)
    }
}
