use sqlx::{Pool, Sqlite};

use crate::db::models::{timestamp_now, Review};
use crate::error::AppError;

pub struct ReviewRepository;

impl ReviewRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        email: &str,
        book_id: i64,
        n_stars: i64,
        content: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
INSERT INTO reviews (email, bookid, n_stars, content, creation_timestamp)
VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(book_id)
        .bind(n_stars)
        .bind(content)
        .bind(timestamp_now())
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Newest first; rows written within the same tick keep insertion order reversed.
    pub async fn list_for_book(
        pool: &Pool<Sqlite>,
        book_id: i64,
    ) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
SELECT email, n_stars, content, creation_timestamp
FROM reviews
WHERE bookid = ?
ORDER BY creation_timestamp DESC, rowid DESC
            "#,
        )
        .bind(book_id)
        .fetch_all(pool)
        .await?;

        Ok(reviews)
    }

    pub async fn reviewed_book_ids(
        pool: &Pool<Sqlite>,
        email: &str,
    ) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT bookid FROM reviews WHERE email = ? ORDER BY bookid"
        )
        .bind(email)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }
}
