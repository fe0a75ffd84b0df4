pub mod books;
pub mod models;
pub mod reviews;
pub mod sessions;
pub mod users;

pub use books::{BookRepository, NewBook};
pub use models::{Book, Review, Session, User};
pub use reviews::ReviewRepository;
pub use sessions::SessionRepository;
pub use users::{UserRepository, USER_EXISTS};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Open the connection pool, creating the database file if needed.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<Pool<Sqlite>, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn migrate(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
