use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::books::find_book;
use crate::api::extract::{Path, Query};
use crate::api::session::authorize;
use crate::api::state::AppState;
use crate::db::{Review, ReviewRepository};
use crate::error::{AppError, BackendContext};

#[derive(Debug, Deserialize)]
pub struct SubmitReviewQuery {
    pub email: Option<String>,
    pub token: Option<String>,
    pub n_stars: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub message: String,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Serialize)]
pub struct ReviewedBooksResponse {
    pub message: String,
    pub reviewed_books: Vec<i64>,
}

fn parse_stars(raw: Option<&str>) -> Result<i64, AppError> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| (0..=5).contains(n))
        .ok_or_else(|| {
            AppError::Validation(
                "Invalid n_stars field, it must be an integer between 0 and 5".to_string(),
            )
        })
}

fn parse_content(raw: Option<&str>) -> Result<&str, AppError> {
    raw.map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            AppError::Validation("Invalid content field, the review cannot be empty".to_string())
        })
}

/// POST /books/review/:id (requires session)
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<SubmitReviewQuery>,
) -> Result<Json<Value>, AppError> {
    const REVIEW_FAILED: &str = "Unable to submit the review";

    let session = authorize(&state.db, query.email.as_deref(), query.token.as_deref())
        .await
        .backend(REVIEW_FAILED)?;

    let n_stars = parse_stars(query.n_stars.as_deref())?;
    let content = parse_content(query.content.as_deref())?;

    find_book(&state.db, id).await?;

    ReviewRepository::create(&state.db, &session.email, id, n_stars, content)
        .await
        .backend(REVIEW_FAILED)?;

    tracing::info!("{} reviewed book {} with {} stars", session.email, id, n_stars);

    Ok(Json(json!({
        "message": "Your review has been successfully submitted",
    })))
}

/// GET /books/getreviews/:id
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReviewsResponse>, AppError> {
    find_book(&state.db, id).await?;

    let reviews = ReviewRepository::list_for_book(&state.db, id)
        .await
        .backend("Unable to fetch the reviews from the database")?;

    Ok(Json(ReviewsResponse {
        message: "Reviews have been successfully retrieved".to_string(),
        reviews,
    }))
}

/// POST /books/getreviewedbooks/:email (requires session)
pub async fn reviewed_books(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<ReviewedBooksResponse>, AppError> {
    const FETCH_FAILED: &str = "Unable to fetch the reviewed books from the database";

    let session = authorize(&state.db, Some(email.as_str()), query.token.as_deref())
        .await
        .backend(FETCH_FAILED)?;

    let reviewed_books = ReviewRepository::reviewed_book_ids(&state.db, &session.email)
        .await
        .backend(FETCH_FAILED)?;

    Ok(Json(ReviewedBooksResponse {
        message: "Reviewed books have been successfully retrieved".to_string(),
        reviewed_books,
    }))
}
