use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Bookmark, CreateBookmarkRequest};

/// Insert a bookmark, keeping URLs unique per user. Re-bookmarking an
/// already-saved URL is a no-op that returns the existing row.
pub async fn insert_or_get(
    pool: &SqlitePool,
    user_id: &str,
    req: &CreateBookmarkRequest,
) -> Result<Bookmark, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO bookmarks
            (id, user_id, title, source, url, description, published_at, sentiment, impact, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id)
    .bind(&req.title)
    .bind(&req.source)
    .bind(&req.url)
    .bind(&req.description)
    .bind(req.published_at)
    .bind(&req.sentiment)
    .bind(&req.impact)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    fetch_by_url(pool, user_id, &req.url)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn fetch_by_url(
    pool: &SqlitePool,
    user_id: &str,
    url: &str,
) -> Result<Option<Bookmark>, sqlx::Error> {
    sqlx::query_as::<_, Bookmark>(
        r#"
        SELECT id, user_id, title, source, url, description, published_at,
               sentiment, impact, created_at
        FROM bookmarks
        WHERE user_id = ? AND url = ?
        "#,
    )
    .bind(user_id)
    .bind(url)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Bookmark>, sqlx::Error> {
    sqlx::query_as::<_, Bookmark>(
        r#"
        SELECT id, user_id, title, source, url, description, published_at,
               sentiment, impact, created_at
        FROM bookmarks
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn delete(
    pool: &SqlitePool,
    user_id: &str,
    bookmark_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE id = ? AND user_id = ?")
        .bind(bookmark_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
