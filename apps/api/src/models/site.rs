use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-deployment customization record. At most one row is expected.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteCustomization {
    pub heading_font: String,
    pub body_font: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub show_trending_section: bool,
    pub show_video_section: bool,
}

impl Default for SiteCustomization {
    fn default() -> Self {
        Self {
            heading_font: "Roboto".to_string(),
            body_font: "Merriweather".to_string(),
            primary_color: "#E3120B".to_string(),
            secondary_color: "#111111".to_string(),
            show_trending_section: true,
            show_video_section: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VideoShort {
    pub id: Uuid,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Auxiliary section page. Its articles are the pages below `tree_path`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupportSection {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub introduction: String,
    pub tree_path: String,
}
