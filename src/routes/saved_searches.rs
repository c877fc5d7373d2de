use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::info;

use crate::db::saved_search_queries;
use crate::errors::AppError;
use crate::models::{CreateSavedSearchRequest, SavedSearch};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(list_saved_searches).post(create_saved_search))
        .route("/:user_id/:search_id", delete(delete_saved_search))
}

/// GET /api/searches/:user_id
async fn list_saved_searches(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SavedSearch>>, AppError> {
    info!("GET /api/searches/{} - Listing saved searches", user_id);

    let searches = saved_search_queries::fetch_for_user(&state.pool, &user_id).await?;
    Ok(Json(searches))
}

/// POST /api/searches/:user_id
async fn create_saved_search(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateSavedSearchRequest>,
) -> Result<Json<SavedSearch>, AppError> {
    info!("POST /api/searches/{} - Saving search", user_id);

    let query = req.query.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let category = req
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    if query.is_none() && category.is_none() {
        return Err(AppError::Validation(
            "A saved search needs a query or a category".to_string(),
        ));
    }

    let search = saved_search_queries::insert(&state.pool, &user_id, query, category).await?;
    Ok(Json(search))
}

/// DELETE /api/searches/:user_id/:search_id
async fn delete_saved_search(
    State(state): State<AppState>,
    Path((user_id, search_id)): Path<(String, String)>,
) -> Result<(), AppError> {
    info!("DELETE /api/searches/{}/{}", user_id, search_id);

    let removed = saved_search_queries::delete(&state.pool, &user_id, &search_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
