//! Listing orchestration: builds the view model for the home page, category
//! sections and support sections out of one shared selection pass.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::editorial::paywall::{can_access_full_content, SubscriberStatus};
use crate::editorial::selection::{select_articles, Selection};
use crate::editorial::trending::is_currently_trending;
use crate::models::article::{Article, Section};
use crate::models::site::{SiteCustomization, SupportSection, VideoShort};
use crate::models::user::Principal;
use crate::store::{CandidateFilter, ContentStore, StoreError};

// ────────────────────────────────────────────────────────────────────────────
// Scopes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum ListingScope {
    /// Everything below the home page.
    SiteWide { home_path: String },
    Section(Section),
    Support(SupportSection),
}

impl ListingScope {
    pub fn candidate_filter(&self) -> CandidateFilter {
        match self {
            ListingScope::SiteWide { home_path } => CandidateFilter::DescendantOf(home_path.clone()),
            ListingScope::Section(section) => CandidateFilter::SectionKey(section.key().to_string()),
            ListingScope::Support(support) => CandidateFilter::DescendantOf(support.tree_path.clone()),
        }
    }

    fn header(&self) -> ScopeHeader {
        match self {
            ListingScope::SiteWide { .. } => ScopeHeader {
                kind: "home",
                key: None,
                title: None,
                introduction: None,
            },
            ListingScope::Section(section) => ScopeHeader {
                kind: "section",
                key: Some(section.key().to_string()),
                title: Some(section.label().to_string()),
                introduction: None,
            },
            ListingScope::Support(support) => ScopeHeader {
                kind: "support",
                key: Some(support.slug.clone()),
                title: Some(support.title.clone()),
                introduction: Some(support.introduction.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScopeHeader {
    pub kind: &'static str,
    pub key: Option<String>,
    pub title: Option<String>,
    pub introduction: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// View model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub heading_font: String,
    pub body_font: String,
    pub primary_color: String,
    pub secondary_color: String,
}

/// Site-wide display toggles. A missing customization record means
/// everything enabled.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayConfig {
    pub show_trending: bool,
    pub show_videos: bool,
    pub theme: Theme,
}

impl From<SiteCustomization> for DisplayConfig {
    fn from(c: SiteCustomization) -> Self {
        DisplayConfig {
            show_trending: c.show_trending_section,
            show_videos: c.show_video_section,
            theme: Theme {
                heading_font: c.heading_font,
                body_font: c.body_font,
                primary_color: c.primary_color,
                secondary_color: c.secondary_color,
            },
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        SiteCustomization::default().into()
    }
}

/// Listing card. Never carries the body; `locked` tells the renderer to show
/// the premium marker and teaser.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleCard {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub introduction: String,
    pub section: String,
    pub publication_date: DateTime<Utc>,
    pub is_premium: bool,
    pub is_trending: bool,
    pub locked: bool,
}

impl ArticleCard {
    fn build(article: Article, status: &SubscriberStatus, now: DateTime<Utc>) -> Self {
        let locked = !can_access_full_content(&article, status);
        let is_trending = is_currently_trending(&article, now);
        ArticleCard {
            id: article.id,
            title: article.title,
            slug: article.slug,
            introduction: article.introduction,
            section: article.section,
            publication_date: article.publication_date,
            is_premium: article.is_premium,
            is_trending,
            locked,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub scope: ScopeHeader,
    pub hero: Option<ArticleCard>,
    pub trending: Vec<ArticleCard>,
    pub regular: Vec<ArticleCard>,
    pub subscriber_status: SubscriberStatus,
    pub display_config: DisplayConfig,
    /// Only filled for the home page, and only when videos are enabled.
    pub featured_videos: Vec<VideoShort>,
}

/// Full article page. `body` is `None` whenever the paywall denies access.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub introduction: String,
    pub body: Option<String>,
    pub section: String,
    pub section_label: Option<&'static str>,
    pub publication_date: DateTime<Utc>,
    pub is_premium: bool,
    pub is_currently_trending: bool,
    pub is_subscriber: bool,
    pub can_access_full_content: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Never fails: lookup errors degrade to a non-subscriber.
pub async fn resolve_subscriber_status(
    store: &dyn ContentStore,
    principal: Principal,
) -> SubscriberStatus {
    match principal {
        Principal::Anonymous => SubscriberStatus::ANONYMOUS,
        Principal::User(user_id) => match store.get_subscriber_profile(user_id).await {
            Ok(profile) => SubscriberStatus::for_authenticated(profile.as_ref()),
            Err(e) => {
                warn!("Subscriber lookup failed for {user_id}, treating as non-subscriber: {e}");
                SubscriberStatus::for_authenticated(None)
            }
        },
    }
}

/// Never fails: a missing or unreadable record yields the defaults.
pub async fn load_display_config(store: &dyn ContentStore) -> DisplayConfig {
    match store.get_site_customization().await {
        Ok(Some(customization)) => customization.into(),
        Ok(None) => DisplayConfig::default(),
        Err(e) => {
            warn!("Site customization unavailable, using defaults: {e}");
            DisplayConfig::default()
        }
    }
}

pub struct ListingRequest {
    pub scope: ListingScope,
    pub principal: Principal,
    pub now: DateTime<Utc>,
    pub featured_videos_limit: usize,
}

pub async fn build_listing(
    store: &dyn ContentStore,
    request: ListingRequest,
) -> Result<ListingView, StoreError> {
    let ListingRequest {
        scope,
        principal,
        now,
        featured_videos_limit,
    } = request;

    let filter = scope.candidate_filter();
    let mut candidates = store.list_live_articles(&filter).await?;
    // Stores are trusted to filter, but a leaked draft or foreign-scope row
    // must never reach the partitions.
    candidates.retain(|a| filter.matches(a));

    let Selection {
        hero,
        trending,
        regular,
    } = select_articles(candidates, now);

    let subscriber_status = resolve_subscriber_status(store, principal).await;
    let display_config = load_display_config(store).await;

    let featured_videos = match &scope {
        ListingScope::SiteWide { .. } if display_config.show_videos => {
            store.list_featured_videos(featured_videos_limit).await?
        }
        _ => Vec::new(),
    };

    let card = |a: Article| ArticleCard::build(a, &subscriber_status, now);

    Ok(ListingView {
        scope: scope.header(),
        hero: hero.map(card),
        trending: trending.into_iter().map(card).collect(),
        regular: regular.into_iter().map(card).collect(),
        subscriber_status,
        display_config,
        featured_videos,
    })
}

/// Returns `None` for unknown or unpublished articles.
pub async fn article_view(
    store: &dyn ContentStore,
    id: Uuid,
    principal: Principal,
    now: DateTime<Utc>,
) -> Result<Option<ArticleView>, StoreError> {
    let Some(article) = store.get_article(id).await?.filter(|a| a.is_live) else {
        return Ok(None);
    };

    let status = resolve_subscriber_status(store, principal).await;
    let can_access = can_access_full_content(&article, &status);
    let is_trending = is_currently_trending(&article, now);
    let section_label = Section::from_key(&article.section).map(|s| s.label());

    Ok(Some(ArticleView {
        id: article.id,
        title: article.title,
        slug: article.slug,
        introduction: article.introduction,
        body: can_access.then_some(article.body),
        section: article.section,
        section_label,
        publication_date: article.publication_date,
        is_premium: article.is_premium,
        is_currently_trending: is_trending,
        is_subscriber: status.is_premium_subscriber(),
        can_access_full_content: can_access,
    }))
}
