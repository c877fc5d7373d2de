use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::SavedSearch;

pub async fn insert(
    pool: &SqlitePool,
    user_id: &str,
    query: Option<&str>,
    category: Option<&str>,
) -> Result<SavedSearch, sqlx::Error> {
    let search = SavedSearch {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        query: query.map(str::to_string),
        category: category.map(str::to_string),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO saved_searches (id, user_id, query, category, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&search.id)
    .bind(&search.user_id)
    .bind(&search.query)
    .bind(&search.category)
    .bind(search.created_at)
    .execute(pool)
    .await?;

    Ok(search)
}

pub async fn fetch_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<SavedSearch>, sqlx::Error> {
    sqlx::query_as::<_, SavedSearch>(
        r#"
        SELECT id, user_id, query, category, created_at
        FROM saved_searches
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Returns the number of rows removed (0 when the id did not belong to the user).
pub async fn delete(
    pool: &SqlitePool,
    user_id: &str,
    search_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM saved_searches WHERE id = ? AND user_id = ?")
        .bind(search_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
