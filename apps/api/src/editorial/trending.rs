//! Trending lifecycle: the "Em Alta" marker.
//!
//! States are derived from the stored `is_trending` / `trending_until` pair.
//! Expiry is lazy: nothing sweeps the table, `is_currently_trending` simply
//! answers `false` once `now` has passed the stored expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::article::Article;

/// Window armed automatically on an article's first publish.
pub const DEFAULT_AUTO_TRENDING_HOURS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "until", rename_all = "snake_case")]
pub enum TrendingState {
    NotTrending,
    TrendingWithExpiry(DateTime<Utc>),
    TrendingIndefinite,
}

impl TrendingState {
    /// Reads the state off the stored fields. The expiry is ignored when the
    /// flag is off.
    pub fn of(article: &Article) -> Self {
        match (article.is_trending, article.trending_until) {
            (false, _) => TrendingState::NotTrending,
            (true, None) => TrendingState::TrendingIndefinite,
            (true, Some(until)) => TrendingState::TrendingWithExpiry(until),
        }
    }

    /// Field values to persist: `(is_trending, trending_until)`.
    pub fn as_fields(&self) -> (bool, Option<DateTime<Utc>>) {
        match self {
            TrendingState::NotTrending => (false, None),
            TrendingState::TrendingWithExpiry(until) => (true, Some(*until)),
            TrendingState::TrendingIndefinite => (true, None),
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            TrendingState::NotTrending => false,
            TrendingState::TrendingIndefinite => true,
            TrendingState::TrendingWithExpiry(until) => now <= *until,
        }
    }
}

/// Pure query, performs no write.
pub fn is_currently_trending(article: &Article, now: DateTime<Utc>) -> bool {
    TrendingState::of(article).is_active_at(now)
}

/// State to arm when an article goes live for the first time.
///
/// Returns `None` when the editor already chose a trending state; manual
/// choices always win over the automatic rule. Stores evaluate this inside
/// the same write that stamps `first_published_at`.
pub fn on_first_publish(
    article: &Article,
    now: DateTime<Utc>,
    window: Duration,
) -> Option<TrendingState> {
    if article.trending_set_by_editor {
        return None;
    }
    Some(TrendingState::TrendingWithExpiry(now + window))
}

/// Editor request coming from the admin side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "until", rename_all = "snake_case")]
pub enum TrendingEdit {
    Indefinite,
    Until(DateTime<Utc>),
    Off,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrendingError {
    #[error("trending expiry {until} is not in the future (now: {now})")]
    ExpiryInPast {
        until: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

pub fn apply_manual_edit(
    edit: TrendingEdit,
    now: DateTime<Utc>,
) -> Result<TrendingState, TrendingError> {
    match edit {
        TrendingEdit::Indefinite => Ok(TrendingState::TrendingIndefinite),
        TrendingEdit::Off => Ok(TrendingState::NotTrending),
        TrendingEdit::Until(until) if until > now => Ok(TrendingState::TrendingWithExpiry(until)),
        TrendingEdit::Until(until) => Err(TrendingError::ExpiryInPast { until, now }),
    }
}
