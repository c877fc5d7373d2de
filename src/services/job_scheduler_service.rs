use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::errors::AppError;
use crate::jobs::cache_purge_job;
use crate::services::cache::NewsCache;

/// Cache purge sweep cadence: every 5 minutes
const PURGE_SCHEDULE: &str = "0 */5 * * * *";

/// Owns the background job scheduler. The process supervisor holds this
/// handle and calls `shutdown` on termination so sweeps stop cleanly.
pub struct JobSchedulerService {
    scheduler: JobScheduler,
    cache: Arc<NewsCache>,
}

impl JobSchedulerService {
    pub async fn new(cache: Arc<NewsCache>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::External(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, cache })
    }

    /// Register and start all scheduled jobs.
    pub async fn start(&mut self) -> Result<(), AppError> {
        info!("🚀 Starting job scheduler...");

        let cache = self.cache.clone();
        let purge_job = Job::new_async(PURGE_SCHEDULE, move |_uuid, _lock| {
            let cache = cache.clone();
            Box::pin(async move {
                cache_purge_job::run(cache).await;
            })
        })
        .map_err(|e| AppError::External(format!("Failed to create purge job: {}", e)))?;

        self.scheduler
            .add(purge_job)
            .await
            .map_err(|e| AppError::External(format!("Failed to add purge job: {}", e)))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::External(format!("Failed to start scheduler: {}", e)))?;

        info!("✅ Job scheduler started (cache purge every 5 minutes)");
        Ok(())
    }

    /// Stop the scheduler. Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        info!("Stopping job scheduler...");
        if let Err(e) = self.scheduler.shutdown().await {
            error!("Job scheduler shutdown failed: {}", e);
        }
    }
}
