use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::extract::Query;
use crate::api::session::authorize;
use crate::api::state::AppState;
use crate::crypto::{generate_token, hash_password, verify_password};
use crate::db::{SessionRepository, UserRepository, USER_EXISTS};
use crate::error::{AppError, BackendContext};

#[derive(Debug, Deserialize)]
pub struct CredentialsQuery {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub email: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

/// Trimmed, non-empty (email, password)
fn credentials(query: &CredentialsQuery) -> Result<(&str, &str), AppError> {
    let email = query.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    let password = query.password.as_deref().map(str::trim).filter(|p| !p.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(AppError::Validation(
            "Missing fields, you need to fill (email, password)".to_string(),
        )),
    }
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Query(query): Query<CredentialsQuery>,
) -> Result<Json<TokenResponse>, AppError> {
    const SIGNUP_FAILED: &str = "Unable to sign up the user";

    let (email, password) = credentials(&query)?;

    if UserRepository::get_by_email(&state.db, email)
        .await
        .backend(SIGNUP_FAILED)?
        .is_some()
    {
        return Err(AppError::Validation(USER_EXISTS.to_string()));
    }

    let token = generate_token();
    UserRepository::create_with_session(&state.db, email, &hash_password(password), &token)
        .await
        .backend(SIGNUP_FAILED)?;

    tracing::info!("User {} signed up", email);

    Ok(Json(TokenResponse {
        message: "User has successfully signed up and in".to_string(),
        token,
    }))
}

/// POST /auth/signin
pub async fn signin(
    State(state): State<AppState>,
    Query(query): Query<CredentialsQuery>,
) -> Result<Json<TokenResponse>, AppError> {
    const SIGNIN_FAILED: &str = "Unable to sign in the user";

    let (email, password) = credentials(&query)?;

    let user = UserRepository::get_by_email(&state.db, email)
        .await
        .backend(SIGNIN_FAILED)?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if !verify_password(password, &user.password) {
        return Err(AppError::Unauthorized("Invalid password credential".to_string()));
    }

    let session = SessionRepository::create(&state.db, &user.email, &generate_token())
        .await
        .backend(SIGNIN_FAILED)?;

    tracing::info!("User {} signed in", user.email);

    Ok(Json(TokenResponse {
        message: "User has successfully signed in".to_string(),
        token: session.token,
    }))
}

/// POST /auth/signout (requires session)
pub async fn signout(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Value>, AppError> {
    const SIGNOUT_FAILED: &str = "Unable to sign out";

    let session = authorize(&state.db, query.email.as_deref(), query.token.as_deref())
        .await
        .backend(SIGNOUT_FAILED)?;

    let removed = SessionRepository::delete(&state.db, &session.email, &session.token)
        .await
        .backend(SIGNOUT_FAILED)?;

    tracing::info!("User {} signed out ({} session removed)", session.email, removed);

    Ok(Json(json!({"message": "User has successfully signed out"})))
}
