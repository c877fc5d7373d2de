use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;

use newswire_backend::app;
use newswire_backend::external::finnhub::FinnhubProvider;
use newswire_backend::external::news_provider::NewsProvider;
use newswire_backend::external::offline::OfflineProvider;
use newswire_backend::logging::{self, LoggingConfig};
use newswire_backend::services::cache::{CacheConfig, NewsCache};
use newswire_backend::services::job_scheduler_service::JobSchedulerService;
use newswire_backend::services::search::NewsSearchService;
use newswire_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://newswire.db?mode=rwc".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Provider selection: a configured credential means live Finnhub, its
    // absence selects the offline variant behind the same interface.
    let provider: Arc<dyn NewsProvider> = match std::env::var("FINNHUB_API_KEY") {
        Ok(api_key) if !api_key.trim().is_empty() => {
            tracing::info!("📰 Using news provider: Finnhub");
            Arc::new(FinnhubProvider::new(api_key)?)
        }
        _ => {
            tracing::warn!("FINNHUB_API_KEY not set, falling back to offline provider");
            Arc::new(OfflineProvider::new())
        }
    };

    let cache = Arc::new(NewsCache::new(pool.clone(), CacheConfig::from_env()));
    let search_service = Arc::new(NewsSearchService::new(provider, cache.clone()));

    let mut scheduler = JobSchedulerService::new(cache).await?;
    scheduler.start().await?;

    let state = AppState {
        pool,
        search_service,
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("🚀 Newswire backend running at http://{}/", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
