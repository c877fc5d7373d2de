use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{QuoteSnapshot, SearchQueryParams, SearchResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_news))
        .route("/quote/:symbol", get(get_quote))
}

/// GET /api/news/search
///
/// Query parameters:
/// - `q`: ticker symbol (company news, trailing 7 days)
/// - `category`: general news category; one of q/category is required
/// - `page`: 1-based page number (default: 1)
/// - `limit`: page size, at most 50 (default: 20)
async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<SearchResponse>, AppError> {
    info!(
        "GET /api/news/search - q={:?} category={:?} page={:?} limit={:?}",
        params.q, params.category, params.page, params.limit
    );

    let response = state.search_service.search(&params).await?;
    Ok(Json(response))
}

/// GET /api/news/quote/:symbol
async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<QuoteSnapshot>, AppError> {
    info!("GET /api/news/quote/{} - Fetching quote", symbol);

    let quote = state.search_service.quote(&symbol).await?;
    Ok(Json(quote))
}
