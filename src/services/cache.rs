use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use crate::db::cache_queries::{self, CacheRow};
use crate::models::Article;
use crate::services::sentiment::overall_sentiment;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied to entries stored without an explicit override
    pub ttl_seconds: i64,
    /// Upper bound on in-process entries before eviction kicks in
    pub max_entries: usize,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            ttl_seconds: std::env::var("NEWS_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(900),
            max_entries: std::env::var("NEWS_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(500),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 900,
            max_entries: 500,
        }
    }
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    articles: Vec<Article>,
    expires_at: DateTime<Utc>,
}

/// Two-tier TTL cache for annotated result sets: an in-process map in front
/// of a persistent `news_cache` table. The memory layer wins when both hold
/// a live entry for the same key. Callers hold an owned handle; there is no
/// module-level singleton.
///
/// Caching is a performance optimization, not a correctness requirement:
/// persistent-layer failures are logged and swallowed.
pub struct NewsCache {
    pool: SqlitePool,
    memory: DashMap<String, MemoryEntry>,
    config: CacheConfig,
}

impl NewsCache {
    pub fn new(pool: SqlitePool, config: CacheConfig) -> Self {
        Self {
            pool,
            memory: DashMap::new(),
            config,
        }
    }

    pub fn default_ttl_seconds(&self) -> i64 {
        self.config.ttl_seconds
    }

    /// Look up a cached payload. Checks the memory layer first, then the
    /// persistent table (non-expired, newest-first); a persistent hit is
    /// backfilled into memory. Expired entries are never returned.
    pub async fn lookup(&self, key: &str) -> Option<Vec<Article>> {
        let now = Utc::now();

        if let Some(entry) = self.memory.get(key) {
            if entry.expires_at > now {
                debug!("Cache hit (memory) for key {}", key);
                return Some(entry.articles.clone());
            }
            drop(entry);
            self.memory.remove(key);
        }

        let row = match cache_queries::fetch_live(&self.pool, key, now).await {
            Ok(row) => row?,
            Err(e) => {
                // A broken cache read degrades to a provider fetch
                warn!("Persistent cache read failed for key {}: {}", key, e);
                return None;
            }
        };

        let articles: Vec<Article> = match serde_json::from_str(&row.response_data) {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Discarding undecodable cache row for key {}: {}", key, e);
                return None;
            }
        };

        debug!("Cache hit (persistent) for key {}", key);
        self.backfill_memory(key, articles.clone(), row.expires_at);

        Some(articles)
    }

    /// Write a payload through to both layers. Empty payloads are cached too,
    /// so repeated empty-result searches stay off the provider within the TTL.
    pub async fn store(&self, key: &str, articles: &[Article], ttl_seconds: i64) {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(ttl_seconds);

        self.backfill_memory(key, articles.to_vec(), expires_at);

        let row = CacheRow {
            query: key.to_string(),
            response_data: match serde_json::to_string(articles) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize cache payload for key {}: {}", key, e);
                    return;
                }
            },
            sentiment: overall_sentiment(articles).to_string(),
            cached_at: now,
            expires_at,
        };

        if let Err(e) = cache_queries::insert(&self.pool, &row).await {
            error!("Persistent cache write failed for key {}: {}", key, e);
        }
    }

    /// Remove expired persistent rows and prune the memory layer. Run by the
    /// background sweep; errors are logged, never fatal.
    pub async fn purge_expired(&self) {
        let now = Utc::now();

        self.memory.retain(|_, entry| entry.expires_at > now);

        match cache_queries::delete_expired(&self.pool, now).await {
            Ok(0) => debug!("Cache purge: nothing to remove"),
            Ok(removed) => info!("Cache purge removed {} expired rows", removed),
            Err(e) => error!("Cache purge failed: {}", e),
        }
    }

    fn backfill_memory(&self, key: &str, articles: Vec<Article>, expires_at: DateTime<Utc>) {
        if self.memory.len() >= self.config.max_entries && !self.memory.contains_key(key) {
            let now = Utc::now();
            self.memory.retain(|_, entry| entry.expires_at > now);

            // Still full after dropping expired entries: evict whichever
            // entry dies soonest to make room.
            if self.memory.len() >= self.config.max_entries {
                let soonest = self
                    .memory
                    .iter()
                    .min_by_key(|entry| entry.expires_at)
                    .map(|entry| entry.key().clone());
                if let Some(victim) = soonest {
                    self.memory.remove(&victim);
                }
            }
        }

        self.memory.insert(
            key.to_string(),
            MemoryEntry {
                articles,
                expires_at,
            },
        );
    }
}

/// Derive the cache key for a search. Pure and order-sensitive over the
/// normalized scope, page and page size: identical requests always collide,
/// distinct ones never do (symbol and category scopes carry distinct tags).
pub fn cache_key(scope_tag: &str, term: &str, page: u32, limit: u32) -> String {
    format!("{}:{}:{}:{}", scope_tag, term.trim().to_lowercase(), page, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Impact, SentimentLabel};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("migrations");
        pool
    }

    fn sample_articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("Article {}", i),
                source: "Test Wire".to_string(),
                published_at: Utc::now() - Duration::hours(1),
                description: "A test article".to_string(),
                url: format!("https://example.com/{}", i),
                image: None,
                category: None,
                sentiment_label: SentimentLabel::Neutral,
                sentiment_score: 0.0,
                impact: Impact::Low,
            })
            .collect()
    }

    #[tokio::test]
    async fn store_then_lookup_round_trips() {
        let cache = NewsCache::new(test_pool().await, CacheConfig::default());
        let articles = sample_articles(3);

        cache.store("q:aapl:1:20", &articles, 60).await;

        let found = cache.lookup("q:aapl:1:20").await.expect("cached payload");
        assert_eq!(found, articles);
    }

    #[tokio::test]
    async fn lookup_is_idempotent() {
        let cache = NewsCache::new(test_pool().await, CacheConfig::default());
        cache.store("k", &sample_articles(2), 60).await;

        let first = cache.lookup("k").await;
        let second = cache.lookup("k").await;
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[tokio::test]
    async fn zero_ttl_entries_are_never_returned() {
        let cache = NewsCache::new(test_pool().await, CacheConfig::default());
        cache.store("dead", &sample_articles(2), 0).await;

        assert!(cache.lookup("dead").await.is_none());
    }

    #[tokio::test]
    async fn unknown_key_misses() {
        let cache = NewsCache::new(test_pool().await, CacheConfig::default());
        assert!(cache.lookup("never-stored").await.is_none());
    }

    #[tokio::test]
    async fn empty_payloads_are_cached() {
        let cache = NewsCache::new(test_pool().await, CacheConfig::default());
        cache.store("empty", &[], 60).await;

        let found = cache.lookup("empty").await;
        assert_eq!(found, Some(Vec::new()));
    }

    #[tokio::test]
    async fn persistent_layer_survives_memory_loss() {
        let pool = test_pool().await;
        let writer = NewsCache::new(pool.clone(), CacheConfig::default());
        let articles = sample_articles(2);
        writer.store("shared", &articles, 60).await;

        // Fresh handle with an empty memory layer reads the durable row
        let reader = NewsCache::new(pool, CacheConfig::default());
        let found = reader.lookup("shared").await.expect("persistent hit");
        assert_eq!(found, articles);
    }

    #[tokio::test]
    async fn purge_removes_expired_rows_only() {
        let pool = test_pool().await;
        let cache = NewsCache::new(pool.clone(), CacheConfig::default());
        cache.store("live", &sample_articles(1), 300).await;
        cache.store("stale", &sample_articles(1), 0).await;

        cache.purge_expired().await;

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news_cache")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 1);
        assert!(cache.lookup("live").await.is_some());
    }

    #[tokio::test]
    async fn memory_layer_respects_max_entries() {
        let config = CacheConfig {
            ttl_seconds: 900,
            max_entries: 2,
        };
        let cache = NewsCache::new(test_pool().await, config);

        cache.store("a", &sample_articles(1), 60).await;
        cache.store("b", &sample_articles(1), 120).await;
        cache.store("c", &sample_articles(1), 180).await;

        assert!(cache.memory.len() <= 2);
        // Evicted entries are still served from the persistent layer
        assert!(cache.lookup("a").await.is_some());
    }

    #[test]
    fn cache_keys_are_normalized_and_collision_free() {
        assert_eq!(cache_key("q", "  AAPL ", 1, 20), cache_key("q", "aapl", 1, 20));
        assert_ne!(cache_key("q", "general", 1, 20), cache_key("c", "general", 1, 20));
        assert_ne!(cache_key("q", "aapl", 1, 20), cache_key("q", "aapl", 2, 20));
        assert_ne!(cache_key("q", "aapl", 1, 20), cache_key("q", "aapl", 1, 50));
    }
}
