use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{bookmarks, health, news, saved_searches};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    // The front end is a separate single-page app, so CORS stays open
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/news", news::router())
        .nest("/api/searches", saved_searches::router())
        .nest("/api/bookmarks", bookmarks::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
