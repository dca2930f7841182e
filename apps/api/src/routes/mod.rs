pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::editorial::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Listings
        .route("/api/v1/home", get(handlers::handle_home))
        .route("/api/v1/sections/:key", get(handlers::handle_section))
        .route("/api/v1/support/:slug", get(handlers::handle_support_section))
        // Articles
        .route("/api/v1/articles/:id", get(handlers::handle_get_article))
        .route("/api/v1/articles/:id/publish", post(handlers::handle_publish))
        .route(
            "/api/v1/articles/:id/trending",
            put(handlers::handle_edit_trending),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::article::fixtures::{article, hours_ago};
    use crate::models::site::SupportSection;
    use crate::models::user::UserProfile;
    use crate::store::{ContentStore, MemoryContentStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(store: Arc<MemoryContentStore>) -> Router {
        build_router(AppState {
            store,
            config: Config::default(),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(Arc::new(MemoryContentStore::new())), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_home_lists_premium_as_locked_for_anonymous() {
        let store = Arc::new(MemoryContentStore::new());
        let now = Utc::now();
        let mut premium = article("exclusivo", hours_ago(now, 1));
        premium.is_premium = true;
        store.insert_article(premium.clone()).await;

        let (status, body) = send(app(store), get("/api/v1/home")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regular"][0]["id"], premium.id.to_string());
        assert_eq!(body["regular"][0]["locked"], true);
        assert_eq!(body["subscriber_status"]["is_authenticated"], false);
        assert!(body["hero"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_section_is_bad_request() {
        let (status, body) = send(
            app(Arc::new(MemoryContentStore::new())),
            get("/api/v1/sections/esportes"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_support_section_is_not_found() {
        let (status, _) = send(
            app(Arc::new(MemoryContentStore::new())),
            get("/api/v1/support/nada"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_support_section_lists_only_its_subtree() {
        let store = Arc::new(MemoryContentStore::new());
        let now = Utc::now();
        store
            .insert_support_section(SupportSection {
                id: Uuid::new_v4(),
                title: "Apoio ao leitor".into(),
                slug: "apoio".into(),
                introduction: "Perguntas frequentes".into(),
                tree_path: "/home/apoio/".into(),
            })
            .await;
        let mut inside = article("como-assinar", hours_ago(now, 2));
        inside.tree_path = "/home/apoio/como-assinar/".into();
        let outside = article("mercado", hours_ago(now, 1));
        store.insert_article(inside.clone()).await;
        store.insert_article(outside).await;

        let (status, body) = send(app(store), get("/api/v1/support/apoio")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scope"]["kind"], "support");
        assert_eq!(body["scope"]["title"], "Apoio ao leitor");
        assert_eq!(body["scope"]["introduction"], "Perguntas frequentes");
        assert!(body["hero"].is_null());
        assert_eq!(body["trending"].as_array().unwrap().len(), 0);
        let regular = body["regular"].as_array().unwrap();
        assert_eq!(regular.len(), 1);
        assert_eq!(regular[0]["id"], inside.id.to_string());
    }

    #[tokio::test]
    async fn test_article_body_gated_by_subscription() {
        let store = Arc::new(MemoryContentStore::new());
        let mut premium = article("exclusivo", Utc::now());
        premium.is_premium = true;
        store.insert_article(premium.clone()).await;
        let subscriber = Uuid::new_v4();
        store
            .insert_profile(UserProfile {
                user_id: subscriber,
                is_subscriber: true,
                subscription_date: None,
            })
            .await;

        let uri = format!("/api/v1/articles/{}", premium.id);
        let (_, anon) = send(app(store.clone()), get(&uri)).await;
        assert!(anon["body"].is_null());
        assert_eq!(anon["can_access_full_content"], false);

        let uri = format!("/api/v1/articles/{}?user_id={subscriber}", premium.id);
        let (_, sub) = send(app(store), get(&uri)).await;
        assert_eq!(sub["body"], premium.body.as_str());
        assert_eq!(sub["is_subscriber"], true);
    }

    #[tokio::test]
    async fn test_publish_then_edit_trending() {
        let store = Arc::new(MemoryContentStore::new());
        let mut draft = article("rascunho", Utc::now());
        draft.is_live = false;
        draft.first_published_at = None;
        store.insert_article(draft.clone()).await;

        let publish = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/articles/{}/publish", draft.id))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(store.clone()), publish).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "first_publish");
        assert_eq!(body["auto_trending"]["state"], "trending_with_expiry");

        let edit = Request::builder()
            .method("PUT")
            .uri(format!("/api/v1/articles/{}/trending", draft.id))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"mode":"off"}"#))
            .unwrap();
        let (status, body) = send(app(store.clone()), edit).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_trending"], false);
        assert_eq!(body["trending_set_by_editor"], true);

        let stored = store.get_article(draft.id).await.unwrap().unwrap();
        assert!(!stored.is_trending);
    }

    #[tokio::test]
    async fn test_trending_edit_in_past_rejected() {
        let store = Arc::new(MemoryContentStore::new());
        let a = article("velho", Utc::now());
        store.insert_article(a.clone()).await;

        let edit = Request::builder()
            .method("PUT")
            .uri(format!("/api/v1/articles/{}/trending", a.id))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"mode":"until","until":"2001-01-01T00:00:00Z"}"#))
            .unwrap();
        let (status, _) = send(app(store), edit).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_publish_unknown_article_not_found() {
        let publish = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/articles/{}/publish", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app(Arc::new(MemoryContentStore::new())), publish).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
