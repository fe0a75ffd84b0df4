pub mod ai;
pub mod auth;
pub mod books;
pub mod extract;
pub mod reviews;
pub mod session;
pub mod state;

pub use state::AppState;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    routing::{delete, get, post},
};
use tower::{BoxError, ServiceBuilder};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::time::Duration;
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))

        // Catalog
        .route("/books/show", get(books::list_books).post(books::list_books))
        .route("/books/add", post(books::add_book))
        .route("/books/edit/:id", post(books::edit_book))
        .route("/books/delete/:id", delete(books::delete_book))

        // Reviews
        .route("/books/review/:id", post(reviews::submit_review))
        .route("/books/getreviews/:id", get(reviews::list_reviews))
        .route("/books/getreviewedbooks/:email", post(reviews::reviewed_books))

        // Authentication
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/signout", post(auth::signout))

        // Completion gateway
        .route("/ai/summary/:id", get(ai::summary))
        .route("/ai/recommendation/:id", get(ai::recommendation))

        // Timeouts surface as a 500 with the usual error body
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        AppError::Backend("Request timed out".to_string())
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", err))
    }
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
