use sqlx::{Pool, Sqlite};

use crate::db::models::{timestamp_now, Session};
use crate::error::AppError;

pub struct SessionRepository;

impl SessionRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        email: &str,
        token: &str,
    ) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
INSERT INTO sessions (email, token, creation_timestamp)
VALUES (?, ?, ?)
RETURNING email, token, creation_timestamp
            "#,
        )
        .bind(email)
        .bind(token)
        .bind(timestamp_now())
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Sessions never expire: the row either exists or it does not.
    pub async fn get(
        pool: &Pool<Sqlite>,
        email: &str,
        token: &str,
    ) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT email, token, creation_timestamp FROM sessions WHERE email = ? AND token = ?"
        )
        .bind(email)
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    pub async fn delete(
        pool: &Pool<Sqlite>,
        email: &str,
        token: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE email = ? AND token = ?")
            .bind(email)
            .bind(token)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
