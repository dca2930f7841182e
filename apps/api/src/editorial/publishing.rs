//! Write side of the trending lifecycle: the post-publish hook and editor edits.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::editorial::trending::{apply_manual_edit, TrendingEdit, TrendingError, TrendingState};
use crate::models::article::Article;
use crate::store::{ContentStore, StoreError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Trending(#[from] TrendingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// This call performed the first publish. `auto_trending` is `None` when
    /// the editor had already chosen a trending state.
    FirstPublish {
        article: Article,
        auto_trending: Option<TrendingState>,
    },
    /// Published before; nothing was re-armed.
    AlreadyPublished,
}

/// Post-publish hook. Idempotent: only the call whose conditional write
/// flipped `first_published_at` arms the automatic trending window, and it
/// does so inside that same write.
pub async fn publish_article(
    store: &dyn ContentStore,
    id: Uuid,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<PublishOutcome, StoreError> {
    let Some(article) = store.mark_first_published(id, now, window).await? else {
        return Ok(PublishOutcome::AlreadyPublished);
    };

    if article.trending_set_by_editor {
        info!("Article {id} published; editor-set trending state kept");
        return Ok(PublishOutcome::FirstPublish {
            article,
            auto_trending: None,
        });
    }

    let state = TrendingState::of(&article);
    info!("Article {id} published; trending armed as {state:?}");
    Ok(PublishOutcome::FirstPublish {
        article,
        auto_trending: Some(state),
    })
}

/// Applies an editor's trending choice. Returns `None` for an unknown article.
pub async fn edit_trending(
    store: &dyn ContentStore,
    id: Uuid,
    edit: TrendingEdit,
    now: DateTime<Utc>,
) -> Result<Option<Article>, LifecycleError> {
    let state = apply_manual_edit(edit, now)?;
    let updated = store.persist_trending_state(id, state).await?;
    if updated.is_some() {
        info!("Editor set trending state of article {id} to {state:?}");
    }
    Ok(updated)
}
