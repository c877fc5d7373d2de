use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Persistent cache row: an annotated result set serialized as JSON,
/// keyed by the derived query signature.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CacheRow {
    pub query: String,
    pub response_data: String,
    pub sentiment: String,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Most recent non-expired row for a key, if any.
pub async fn fetch_live(
    pool: &SqlitePool,
    key: &str,
    now: DateTime<Utc>,
) -> Result<Option<CacheRow>, sqlx::Error> {
    sqlx::query_as::<_, CacheRow>(
        r#"
        SELECT query, response_data, sentiment, cached_at, expires_at
        FROM news_cache
        WHERE query = ? AND expires_at > ?
        ORDER BY cached_at DESC
        LIMIT 1
        "#,
    )
    .bind(key)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Expired rows are superseded by insert, never updated in place.
pub async fn insert(pool: &SqlitePool, row: &CacheRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO news_cache (query, response_data, sentiment, cached_at, expires_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&row.query)
    .bind(&row.response_data)
    .bind(&row.sentiment)
    .bind(row.cached_at)
    .bind(row.expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete rows whose expiry has passed; returns the number removed.
pub async fn delete_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM news_cache WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
