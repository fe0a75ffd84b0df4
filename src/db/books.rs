use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::catalog::{BookFields, BookFilter, BookValidationError, Currency};
use crate::db::models::Book;
use crate::error::AppError;

/// A fully validated book ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: i64,
    pub price: f64,
    pub currency: Currency,
    pub genre: String,
}

impl TryFrom<BookFields> for NewBook {
    type Error = BookValidationError;

    fn try_from(fields: BookFields) -> Result<Self, Self::Error> {
        Ok(NewBook {
            title: fields.title.ok_or(BookValidationError::MissingFields)?,
            author: fields.author.ok_or(BookValidationError::MissingFields)?,
            publication_year: fields
                .publication_year
                .ok_or(BookValidationError::MissingFields)?,
            price: fields.price.ok_or(BookValidationError::MissingFields)?,
            currency: fields.currency.unwrap_or(Currency::Usd),
            genre: fields.genre.unwrap_or_default(),
        })
    }
}

pub struct BookRepository;

impl BookRepository {
    pub async fn list(pool: &Pool<Sqlite>, filter: &BookFilter) -> Result<Vec<Book>, AppError> {
        let mut query = filter.query();
        tracing::debug!("Listing books: {}", query.sql());

        let books = query.build_query_as::<Book>().fetch_all(pool).await?;

        Ok(books)
    }

    pub async fn get_by_id(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, publication_year, price, currency, genre FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(book)
    }

    /// Case-insensitive lookup used to keep (title, author) pairs unique.
    pub async fn find_by_title_author(
        pool: &Pool<Sqlite>,
        title: &str,
        author: &str,
    ) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
SELECT id, title, author, publication_year, price, currency, genre
FROM books
WHERE LOWER(title) = LOWER(?) AND LOWER(author) = LOWER(?)
LIMIT 1
            "#,
        )
        .bind(title)
        .bind(author)
        .fetch_optional(pool)
        .await?;

        Ok(book)
    }

    pub async fn create(pool: &Pool<Sqlite>, book: &NewBook) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
INSERT INTO books (title, author, publication_year, price, currency, genre)
VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.publication_year)
        .bind(book.price)
        .bind(book.currency.as_str())
        .bind(&book.genre)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Write the supplied fields of `id`. Empty strings are skipped.
    /// Returns `false` when there was nothing to write.
    pub async fn update(
        pool: &Pool<Sqlite>,
        id: i64,
        fields: &BookFields,
    ) -> Result<bool, AppError> {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE books SET ");
        let mut assignments = 0;
        {
            let mut set = qb.separated(", ");

            if let Some(title) = non_empty(&fields.title) {
                set.push("title = ").push_bind_unseparated(title);
                assignments += 1;
            }
            if let Some(author) = non_empty(&fields.author) {
                set.push("author = ").push_bind_unseparated(author);
                assignments += 1;
            }
            if let Some(year) = fields.publication_year {
                set.push("publication_year = ").push_bind_unseparated(year);
                assignments += 1;
            }
            if let Some(price) = fields.price {
                set.push("price = ").push_bind_unseparated(price);
                assignments += 1;
            }
            if let Some(currency) = fields.currency {
                set.push("currency = ")
                    .push_bind_unseparated(currency.as_str());
                assignments += 1;
            }
            if let Some(genre) = non_empty(&fields.genre) {
                set.push("genre = ").push_bind_unseparated(genre);
                assignments += 1;
            }
        }

        if assignments == 0 {
            return Ok(false);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(pool).await?;

        Ok(true)
    }

    pub async fn delete(pool: &Pool<Sqlite>, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
