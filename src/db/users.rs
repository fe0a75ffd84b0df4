use sqlx::{Pool, Sqlite};

use crate::db::models::{timestamp_now, User};
use crate::error::AppError;

pub const USER_EXISTS: &str = "User already exists";

pub struct UserRepository;

impl UserRepository {
    /// Insert the user together with its first session, committed as one unit.
    ///
    /// A concurrent sign-up that already claimed `email` fails the same way the
    /// up-front existence check does.
    pub async fn create_with_session(
        pool: &Pool<Sqlite>,
        email: &str,
        password_digest: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO users (email, password) VALUES (?, ?)")
            .bind(email)
            .bind(password_digest)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Validation(USER_EXISTS.to_string())
                }
                other => AppError::Database(other),
            })?;

        sqlx::query(
            r#"
INSERT INTO sessions (email, token, creation_timestamp)
VALUES (?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(token)
        .bind(timestamp_now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    pub async fn get_by_email(
        pool: &Pool<Sqlite>,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT email, password FROM users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
