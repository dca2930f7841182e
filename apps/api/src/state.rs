use std::sync::Arc;

use crate::config::Config;
use crate::store::ContentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable content store. Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn ContentStore>,
    pub config: Config,
}
