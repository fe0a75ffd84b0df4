use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;

use crate::catalog::Currency;
use crate::error::AppError;

/// Raw book fields as they arrive in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub genre: Option<String>,
}

/// Normalized book fields. `None` means the field was not supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i64>,
    pub price: Option<f64>,
    pub currency: Option<Currency>,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookValidationError {
    #[error("Missing fields, you need to fill (title, author, publication_year, price)")]
    MissingFields,

    #[error("Invalid publication_year field, it must be a positive integer")]
    InvalidYear,

    #[error("Invalid price field, it must be a positive floating point number")]
    InvalidPrice,

    #[error("Invalid currency field, it must be one of USD, EUR")]
    InvalidCurrency,
}

impl From<BookValidationError> for AppError {
    fn from(err: BookValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+$").expect("year pattern compiles"))
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d+$").expect("price pattern compiles"))
}

/// Validate and normalize book fields.
///
/// Rules are checked in order and the first failure wins: required fields
/// (unless `allow_empty_fields`), year format, price format, currency.
/// A bare integer price such as `10` is rejected; the decimal point is mandatory.
pub fn validate_book(
    input: &BookInput,
    allow_empty_fields: bool,
) -> Result<BookFields, BookValidationError> {
    if !allow_empty_fields
        && (input.title.is_none()
            || input.author.is_none()
            || input.publication_year.is_none()
            || input.price.is_none())
    {
        return Err(BookValidationError::MissingFields);
    }

    let publication_year = match input.publication_year.as_deref().map(str::trim) {
        Some(year) if year_pattern().is_match(year) => Some(
            year.parse::<i64>()
                .map_err(|_| BookValidationError::InvalidYear)?,
        ),
        Some(_) => return Err(BookValidationError::InvalidYear),
        None => None,
    };

    let price = match input.price.as_deref().map(str::trim) {
        Some(price) if price_pattern().is_match(price) => Some(
            price
                .parse::<f64>()
                .map_err(|_| BookValidationError::InvalidPrice)?,
        ),
        Some(_) => return Err(BookValidationError::InvalidPrice),
        None => None,
    };

    let currency = input
        .currency
        .as_deref()
        .map(|c| c.trim().parse::<Currency>())
        .transpose()?;

    Ok(BookFields {
        title: input.title.as_deref().map(|s| s.trim().to_string()),
        author: input.author.as_deref().map(|s| s.trim().to_string()),
        publication_year,
        price,
        currency,
        genre: input.genre.as_deref().map(|s| s.trim().to_string()),
    })
}
