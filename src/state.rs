use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::search::NewsSearchService;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub search_service: Arc<NewsSearchService>,
}
