//! Article selection: partitions one scope's candidates into hero, trending and regular.
//!
//! Shared by every listing page; only candidate construction differs per scope.
//! Premium articles are never filtered here.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::editorial::trending::is_currently_trending;
use crate::models::article::Article;

/// Output of one selection pass. The three tiers are pairwise disjoint and
/// together hold every candidate exactly once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    pub hero: Option<Article>,
    pub trending: Vec<Article>,
    pub regular: Vec<Article>,
}

#[cfg(test)]
impl Selection {
    pub fn len(&self) -> usize {
        usize::from(self.hero.is_some()) + self.trending.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Newest first, id descending on equal timestamps.
fn newest_first(a: &Article, b: &Article) -> Ordering {
    b.publication_date
        .cmp(&a.publication_date)
        .then_with(|| b.id.cmp(&a.id))
}

/// Partitions `candidates` (already live and in scope).
///
/// 1. Hero: the newest article flagged as featured highlight. No fallback to
///    plain recency when nothing is flagged.
/// 2. Trending: every remaining article currently trending at `now`.
/// 3. Regular: everything else.
///
/// Trending is an O(n) scan over the remaining pool. Candidate sets are one
/// section's worth of articles.
pub fn select_articles(candidates: Vec<Article>, now: DateTime<Utc>) -> Selection {
    let mut pool = candidates;
    pool.sort_by(newest_first);

    let hero = pool
        .iter()
        .position(|a| a.is_featured_highlight)
        .map(|idx| pool.remove(idx));

    let (trending, regular): (Vec<Article>, Vec<Article>) = pool
        .into_iter()
        .partition(|a| is_currently_trending(a, now));

    tracing::debug!(
        hero = hero.is_some(),
        trending = trending.len(),
        regular = regular.len(),
        "Selection computed"
    );

    Selection {
        hero,
        trending,
        regular,
    }
}
