//! Axum route handlers for the editorial API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::editorial::listing::{
    article_view, build_listing, ArticleView, ListingRequest, ListingScope, ListingView,
};
use crate::editorial::publishing::{edit_trending, publish_article, PublishOutcome};
use crate::editorial::trending::TrendingEdit;
use crate::errors::AppError;
use crate::models::article::{Article, Section};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReaderQuery {
    pub user_id: Option<Uuid>,
}

async fn listing(
    state: &AppState,
    scope: ListingScope,
    query: ReaderQuery,
) -> Result<Json<ListingView>, AppError> {
    let view = build_listing(
        state.store.as_ref(),
        ListingRequest {
            scope,
            principal: query.user_id.into(),
            now: Utc::now(),
            featured_videos_limit: state.config.featured_videos_limit,
        },
    )
    .await?;
    Ok(Json(view))
}

/// GET /api/v1/home
pub async fn handle_home(
    State(state): State<AppState>,
    Query(query): Query<ReaderQuery>,
) -> Result<Json<ListingView>, AppError> {
    let scope = ListingScope::SiteWide {
        home_path: state.config.home_tree_path.clone(),
    };
    listing(&state, scope, query).await
}

/// GET /api/v1/sections/:key
pub async fn handle_section(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<ReaderQuery>,
) -> Result<Json<ListingView>, AppError> {
    let section = Section::from_key(&key)
        .ok_or_else(|| AppError::Validation(format!("Unknown section '{key}'")))?;
    listing(&state, ListingScope::Section(section), query).await
}

/// GET /api/v1/support/:slug
pub async fn handle_support_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ReaderQuery>,
) -> Result<Json<ListingView>, AppError> {
    let support = state
        .store
        .find_support_section(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Support section '{slug}' not found")))?;
    listing(&state, ListingScope::Support(support), query).await
}

/// GET /api/v1/articles/:id
pub async fn handle_get_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ReaderQuery>,
) -> Result<Json<ArticleView>, AppError> {
    let view = article_view(state.store.as_ref(), id, query.user_id.into(), Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))?;
    Ok(Json(view))
}

/// POST /api/v1/articles/:id/publish
///
/// Post-publish hook called by the CMS after an article goes live.
pub async fn handle_publish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublishOutcome>, AppError> {
    if state.store.get_article(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Article {id} not found")));
    }
    let window = Duration::hours(state.config.auto_trending_hours);
    let outcome = publish_article(state.store.as_ref(), id, Utc::now(), window).await?;
    Ok(Json(outcome))
}

/// PUT /api/v1/articles/:id/trending
pub async fn handle_edit_trending(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<TrendingEdit>,
) -> Result<Json<Article>, AppError> {
    let article = edit_trending(state.store.as_ref(), id, edit, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))?;
    Ok(Json(article))
}
