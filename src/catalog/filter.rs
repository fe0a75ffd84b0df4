use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};
use std::str::FromStr;

use crate::error::AppError;

const SELECT_BOOKS: &str =
    "SELECT id, title, author, publication_year, price, currency, genre FROM books";

/// Query parameters accepted by the book listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksParams {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub genre: Option<String>,
    pub count: Option<String>,
    pub sortby: Option<String>,
    pub reverse: Option<String>,
}

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    Author,
    PublicationYear,
    Price,
    Currency,
    Genre,
}

impl SortColumn {
    pub fn column(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Author => "author",
            SortColumn::PublicationYear => "publication_year",
            SortColumn::Price => "price",
            SortColumn::Currency => "currency",
            SortColumn::Genre => "genre",
        }
    }

    /// Text columns sort case-insensitively on their trimmed value.
    fn order_expr(&self) -> String {
        match self {
            SortColumn::Title | SortColumn::Author | SortColumn::Currency | SortColumn::Genre => {
                format!("LOWER(TRIM({}))", self.column())
            }
            _ => self.column().to_string(),
        }
    }
}

impl FromStr for SortColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortColumn::Id),
            "title" => Ok(SortColumn::Title),
            "author" => Ok(SortColumn::Author),
            "publication_year" => Ok(SortColumn::PublicationYear),
            "price" => Ok(SortColumn::Price),
            "currency" => Ok(SortColumn::Currency),
            "genre" => Ok(SortColumn::Genre),
            other => Err(AppError::Validation(format!(
                "Invalid sortby parameter '{}', it must be a book field",
                other
            ))),
        }
    }
}

/// A parsed book listing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i64>,
    /// Whole units; compared against the stored price truncated to an integer.
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub genre: Option<String>,
    pub count: Option<i64>,
    pub sort_by: Option<SortColumn>,
    pub reverse: bool,
}

fn parse_non_negative(name: &str, value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid {} parameter, it must be a positive integer",
                name
            ))
        })
}

impl BookFilter {
    pub fn from_params(params: &ListBooksParams) -> Result<Self, AppError> {
        Ok(BookFilter {
            title: params.title.clone(),
            author: params.author.clone(),
            publication_year: params
                .publication_year
                .as_deref()
                .map(|v| parse_non_negative("publication_year", v))
                .transpose()?,
            price: params
                .price
                .as_deref()
                .map(|v| parse_non_negative("price", v))
                .transpose()?,
            currency: params.currency.clone(),
            genre: params.genre.clone(),
            count: params
                .count
                .as_deref()
                .map(|v| parse_non_negative("count", v))
                .transpose()?,
            sort_by: params
                .sortby
                .as_deref()
                .map(SortColumn::from_str)
                .transpose()?,
            reverse: params
                .reverse
                .as_deref()
                .and_then(|v| v.trim().parse::<i64>().ok())
                == Some(1),
        })
    }

    /// Build the listing statement. Every user value is bound, never interpolated.
    pub fn query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(SELECT_BOOKS);
        let mut has_condition = false;

        let mut next_condition = |qb: &mut QueryBuilder<'static, Sqlite>| {
            qb.push(if has_condition { " AND " } else { " WHERE " });
            has_condition = true;
        };

        if let Some(title) = &self.title {
            next_condition(&mut qb);
            qb.push("LOWER(title) LIKE '%' || LOWER(")
                .push_bind(title.clone())
                .push(") || '%'");
        }

        if let Some(author) = &self.author {
            next_condition(&mut qb);
            qb.push("LOWER(author) LIKE '%' || LOWER(")
                .push_bind(author.clone())
                .push(") || '%'");
        }

        if let Some(year) = self.publication_year {
            next_condition(&mut qb);
            qb.push("publication_year = ").push_bind(year);
        }

        if let Some(price) = self.price {
            next_condition(&mut qb);
            qb.push("CAST(price AS INTEGER) = ").push_bind(price);
        }

        if let Some(currency) = &self.currency {
            next_condition(&mut qb);
            qb.push("LOWER(currency) = LOWER(")
                .push_bind(currency.clone())
                .push(")");
        }

        if let Some(genre) = &self.genre {
            next_condition(&mut qb);
            qb.push("LOWER(genre) LIKE '%' || LOWER(")
                .push_bind(genre.clone())
                .push(") || '%'");
        }

        if let Some(column) = self.sort_by {
            qb.push(format!(
                " ORDER BY {} {}",
                column.order_expr(),
                if self.reverse { "DESC" } else { "ASC" }
            ));
        }

        if let Some(count) = self.count {
            qb.push(" LIMIT ").push_bind(count);
        }

        qb
    }
}
