//! Book catalog rules: field validation and the listing query builder.

pub mod filter;
pub mod validate;

pub use filter::{BookFilter, ListBooksParams, SortColumn};
pub use validate::{validate_book, BookFields, BookInput, BookValidationError};

use std::fmt;
use std::str::FromStr;

/// Currencies a book price may be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Eur];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = BookValidationError;

    /// Exact, case-sensitive match on the ISO code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(BookValidationError::InvalidCurrency)
    }
}
