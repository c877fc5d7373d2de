use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::info;

use crate::db::bookmark_queries;
use crate::errors::AppError;
use crate::models::{Bookmark, CreateBookmarkRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(list_bookmarks).post(create_bookmark))
        .route("/:user_id/:bookmark_id", delete(delete_bookmark))
}

/// GET /api/bookmarks/:user_id
async fn list_bookmarks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Bookmark>>, AppError> {
    info!("GET /api/bookmarks/{} - Listing bookmarks", user_id);

    let bookmarks = bookmark_queries::fetch_for_user(&state.pool, &user_id).await?;
    Ok(Json(bookmarks))
}

/// POST /api/bookmarks/:user_id
///
/// URLs are unique per user; bookmarking the same article twice returns the
/// existing bookmark instead of a duplicate.
async fn create_bookmark(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateBookmarkRequest>,
) -> Result<Json<Bookmark>, AppError> {
    info!("POST /api/bookmarks/{} - Bookmarking {}", user_id, req.url);

    if req.title.trim().is_empty() || req.url.trim().is_empty() {
        return Err(AppError::Validation(
            "A bookmark needs a title and a url".to_string(),
        ));
    }

    let bookmark = bookmark_queries::insert_or_get(&state.pool, &user_id, &req).await?;
    Ok(Json(bookmark))
}

/// DELETE /api/bookmarks/:user_id/:bookmark_id
async fn delete_bookmark(
    State(state): State<AppState>,
    Path((user_id, bookmark_id)): Path<(String, String)>,
) -> Result<(), AppError> {
    info!("DELETE /api/bookmarks/{}/{}", user_id, bookmark_id);

    let removed = bookmark_queries::delete(&state.pool, &user_id, &bookmark_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
