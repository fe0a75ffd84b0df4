use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i64,
    pub price: f64,
    pub currency: String,
    pub genre: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    /// Hex-encoded SHA-256 digest of the password.
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub email: String,
    pub token: String,
    pub creation_timestamp: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub email: String,
    pub n_stars: i64,
    pub content: String,
    pub creation_timestamp: String,
}

/// Timestamp text for `creation_timestamp` columns; sorts lexically in time order.
pub fn timestamp_now() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}
