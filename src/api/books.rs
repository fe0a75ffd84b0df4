use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};
use sqlx::{Pool, Sqlite};

use crate::api::extract::{Path, Query};
use crate::api::state::AppState;
use crate::catalog::{validate_book, BookFilter, BookInput, Currency, ListBooksParams};
use crate::db::{Book, BookRepository, NewBook};
use crate::error::{AppError, BackendContext};

pub const BOOK_NOT_FOUND: &str = "Unable to find the book within the database";
const BOOK_LOOKUP_FAILED: &str = "Unable to search the book inside the database";

/// Load a book or fail with the not-found error shared by every book route.
pub async fn find_book(db: &Pool<Sqlite>, id: i64) -> Result<Book, AppError> {
    BookRepository::get_by_id(db, id)
        .await
        .backend(BOOK_LOOKUP_FAILED)?
        .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
}

/// Currency falls back to USD and genre to empty when the caller leaves them out.
fn with_defaults(mut input: BookInput) -> BookInput {
    input
        .currency
        .get_or_insert_with(|| Currency::Usd.as_str().to_string());
    input.genre.get_or_insert_with(String::new);
    input
}

/// GET|POST /books/show
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListBooksParams>,
) -> Result<Json<Vec<Book>>, AppError> {
    let filter = BookFilter::from_params(&params)?;

    let books = BookRepository::list(&state.db, &filter)
        .await
        .backend("Unable to fetch the books from the database")?;

    Ok(Json(books))
}

/// POST /books/add
pub async fn add_book(
    State(state): State<AppState>,
    Query(input): Query<BookInput>,
) -> Result<Json<Value>, AppError> {
    const ADD_FAILED: &str = "Unable to add the new book to the database";

    let fields = validate_book(&with_defaults(input), false)?;
    let book = NewBook::try_from(fields)?;

    let existing = BookRepository::find_by_title_author(&state.db, &book.title, &book.author)
        .await
        .backend(ADD_FAILED)?;

    if existing.is_some() {
        return Err(AppError::Validation(
            "Unable to add the new book since it already exists".to_string(),
        ));
    }

    let id = BookRepository::create(&state.db, &book)
        .await
        .backend(ADD_FAILED)?;

    tracing::info!("Added book {} '{}' by {}", id, book.title, book.author);

    Ok(Json(json!({
        "message": "Your book has been successfully added to the collection",
    })))
}

/// POST /books/edit/:id
pub async fn edit_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(input): Query<BookInput>,
) -> Result<Json<Value>, AppError> {
    let fields = validate_book(&with_defaults(input), true)?;

    find_book(&state.db, id).await?;

    let written = BookRepository::update(&state.db, id, &fields)
        .await
        .backend("Unable to edit the book from the database")?;

    if written {
        tracing::info!("Edited book {}", id);
    } else {
        tracing::debug!("Edit of book {} had no fields to write", id);
    }

    Ok(Json(json!({
        "message": "Your book has been successfully edited",
    })))
}

/// DELETE /books/delete/:id
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    find_book(&state.db, id).await?;

    let deleted = BookRepository::delete(&state.db, id)
        .await
        .backend("Unable to delete the book from the database")?;

    tracing::info!("Deleted book {} ({} rows)", id, deleted);

    Ok(Json(json!({
        "message": "Your book has been successfully deleted from the collection",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_only_fill_missing_fields() {
        let input = with_defaults(BookInput {
            currency: Some("EUR".into()),
            ..Default::default()
        });
        assert_eq!(input.currency.as_deref(), Some("EUR"));
        assert_eq!(input.genre.as_deref(), Some(""));

        let input = with_defaults(BookInput::default());
        assert_eq!(input.currency.as_deref(), Some("USD"));
    }
}
