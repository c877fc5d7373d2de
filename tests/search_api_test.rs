/// End-to-end tests for the news search API, run against the real router
/// with the offline provider and an in-memory SQLite store.
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use newswire_backend::app::create_app;
use newswire_backend::external::offline::OfflineProvider;
use newswire_backend::models::{Bookmark, SearchResponse};
use newswire_backend::services::cache::{CacheConfig, NewsCache};
use newswire_backend::services::search::NewsSearchService;
use newswire_backend::state::AppState;

async fn test_app() -> axum::Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let provider = Arc::new(OfflineProvider::new());
    let cache = Arc::new(NewsCache::new(pool.clone(), CacheConfig::default()));
    let search_service = Arc::new(NewsSearchService::new(provider, cache));

    create_app(AppState {
        pool,
        search_service,
    })
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn search_returns_annotated_articles_with_pagination() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/news/search?q=AAPL&page=1&limit=20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: SearchResponse = body_json(response).await;
    assert!(body.pagination.total > 0);
    assert_eq!(body.pagination.page, 1);
    assert_eq!(body.pagination.limit, 20);
    for article in &body.articles {
        assert!(!article.title.is_empty());
        assert!(!article.url.is_empty());
        // Every article leaves the pipeline annotated
        let _ = article.sentiment_label;
        let _ = article.impact;
    }
}

#[tokio::test]
async fn search_without_scope_is_a_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/news/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_limit_is_rejected_not_clamped() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/news/search?q=AAPL&limit=51")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quote_endpoint_returns_a_snapshot() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/news/quote/MSFT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let quote: serde_json::Value = body_json(response).await;
    assert_eq!(quote["symbol"], "MSFT");
    assert!(quote["current_price"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn bookmarking_the_same_url_twice_keeps_one_row() {
    let app = test_app().await;

    let payload = serde_json::json!({
        "title": "Markets rally on strong earnings",
        "url": "https://news.example.com/markets/1",
        "source": "Test Wire",
        "sentiment": "positive",
        "impact": "high"
    });

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bookmarks/user-1")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bookmarks/user-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let bookmarks: Vec<Bookmark> = body_json(response).await;
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].url, "https://news.example.com/markets/1");
}

#[tokio::test]
async fn saved_search_lifecycle() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/searches/user-1")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query": "AAPL"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: serde_json::Value = body_json(response).await;
    let search_id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/searches/user-1/{}", search_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again is a 404: the row is gone
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/searches/user-1/{}", search_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
