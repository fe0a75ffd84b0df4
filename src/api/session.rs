use sqlx::{Pool, Sqlite};

use crate::db::{Session, SessionRepository};
use crate::error::AppError;

pub const MISSING_CREDENTIALS: &str = "You lack authorization to make this call";
pub const INVALID_SESSION: &str =
    "Invalid request due to session expiration or invalid credentials";

/// Succeeds iff a session row with exactly this (email, token) pair exists.
///
/// Called by each protected handler on its own; there is no middleware,
/// no expiry and no refresh.
pub async fn authorize(
    db: &Pool<Sqlite>,
    email: Option<&str>,
    token: Option<&str>,
) -> Result<Session, AppError> {
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let token = token.map(str::trim).filter(|t| !t.is_empty());

    let (Some(email), Some(token)) = (email, token) else {
        return Err(AppError::Unauthorized(MISSING_CREDENTIALS.to_string()));
    };

    SessionRepository::get(db, email, token)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_SESSION.to_string()))
}
