use std::sync::Arc;

use tracing::debug;

use crate::services::cache::NewsCache;

/// Sweep the news cache: drop expired persistent rows and prune the memory
/// layer. Errors are handled (logged) inside the cache service, so a failed
/// sweep never disturbs the scheduler.
pub async fn run(cache: Arc<NewsCache>) {
    debug!("Running cache purge sweep");
    cache.purge_expired().await;
}
