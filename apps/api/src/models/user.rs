use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reader profile kept alongside the (external) auth user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub is_subscriber: bool,
    pub subscription_date: Option<DateTime<Utc>>,
}

/// Who is asking. Authentication happens upstream; we only get an id or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(Uuid),
}

impl From<Option<Uuid>> for Principal {
    fn from(user_id: Option<Uuid>) -> Self {
        match user_id {
            Some(id) => Principal::User(id),
            None => Principal::Anonymous,
        }
    }
}
