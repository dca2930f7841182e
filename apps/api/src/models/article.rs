use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A published (or draft) article page as held by the content store.
///
/// `is_premium` is an editorial flag. Nothing in the listing or trending code writes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub introduction: String,
    pub body: String,
    pub publication_date: DateTime<Utc>,
    /// Category key, see [`Section`].
    pub section: String,
    /// Materialized page-tree path, e.g. `/home/apoio/guia-de-leitura/`.
    pub tree_path: String,
    pub is_live: bool,
    pub is_premium: bool,
    pub is_featured_highlight: bool,
    pub is_trending: bool,
    pub trending_until: Option<DateTime<Utc>>,
    /// Set when an editor has touched the trending fields; the automatic
    /// first-publish rule never overrides it.
    pub trending_set_by_editor: bool,
    pub first_published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// True when `self` sits strictly below `ancestor_path` in the page tree.
    pub fn is_descendant_of(&self, ancestor_path: &str) -> bool {
        self.tree_path.len() > ancestor_path.len() && self.tree_path.starts_with(ancestor_path)
    }
}

/// Editorial sections an article can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    EmAlta,
    Geopolitica,
    Economia,
    Clima,
    Tecnologia,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::EmAlta,
        Section::Geopolitica,
        Section::Economia,
        Section::Clima,
        Section::Tecnologia,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::EmAlta => "em-alta",
            Section::Geopolitica => "geopolitica",
            Section::Economia => "economia",
            Section::Clima => "clima",
            Section::Tecnologia => "tecnologia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::EmAlta => "Em Alta",
            Section::Geopolitica => "Geopolítica",
            Section::Economia => "Economia",
            Section::Clima => "Clima",
            Section::Tecnologia => "Tecnologia",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::Duration;

    /// A live, non-premium, non-trending article filed under `economia`
    /// directly below the home page.
    pub fn article(slug: &str, published: DateTime<Utc>) -> Article {
        Article {
            id: Uuid::new_v4(),
            title: slug.replace('-', " "),
            slug: slug.to_string(),
            introduction: format!("Intro for {slug}"),
            body: format!("Full body for {slug}"),
            publication_date: published,
            section: Section::Economia.key().to_string(),
            tree_path: format!("/home/{slug}/"),
            is_live: true,
            is_premium: false,
            is_featured_highlight: false,
            is_trending: false,
            trending_until: None,
            trending_set_by_editor: false,
            first_published_at: Some(published),
        }
    }

    pub fn hours_ago(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
        now - Duration::hours(hours)
    }
}
