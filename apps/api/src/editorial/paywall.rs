//! Paywall resolver. Decides full-body access only; listing membership is
//! never filtered by it.

use serde::{Deserialize, Serialize};

use crate::models::article::Article;
use crate::models::user::UserProfile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberStatus {
    pub is_authenticated: bool,
    pub is_subscriber: bool,
}

impl SubscriberStatus {
    pub const ANONYMOUS: SubscriberStatus = SubscriberStatus {
        is_authenticated: false,
        is_subscriber: false,
    };

    /// An authenticated principal with no profile row reads as a non-subscriber.
    pub fn for_authenticated(profile: Option<&UserProfile>) -> Self {
        SubscriberStatus {
            is_authenticated: true,
            is_subscriber: profile.map(|p| p.is_subscriber).unwrap_or(false),
        }
    }

    pub fn is_premium_subscriber(&self) -> bool {
        self.is_authenticated && self.is_subscriber
    }
}

pub fn can_access_full_content(article: &Article, status: &SubscriberStatus) -> bool {
    !article.is_premium || status.is_premium_subscriber()
}
