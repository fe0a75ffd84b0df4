use crate::error::AppError;

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub request_timeout_secs: u64,
    pub completion_api_key: String,
    pub completion_api_url: String,
    pub completion_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        // settings/.env is where the deployment keeps its secrets; a plain .env also works
        dotenvy::from_filename("settings/.env").ok();
        dotenvy::dotenv().ok();

        Ok(Config {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_var("SERVER_PORT", "8000")?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://bookdb.db".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "10")?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", "1")?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "120")?,
            completion_api_key: std::env::var("GROQ_API_KEY")
                .map_err(|_| AppError::Config("GROQ_API_KEY is not set".to_string()))?,
            completion_api_url: std::env::var("COMPLETION_API_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            completion_timeout_secs: parse_var("COMPLETION_TIMEOUT_SECS", "60")?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
}
