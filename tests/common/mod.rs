// Common functionality for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, http::StatusCode, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{Pool, Sqlite};
use tower::ServiceExt;

use book_catalog::api::{create_router, AppState};
use book_catalog::catalog::Currency;
use book_catalog::completion::{ChatMessage, CompletionGateway};
use book_catalog::db::{self, BookRepository, NewBook};
use book_catalog::error::AppError;

/// Completion gateway that records prompts instead of calling out.
pub struct FakeGateway {
    reply: Result<String, String>,
    delay: Duration,
    calls: AtomicUsize,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeGateway {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            ..Self::replying("")
        }
    }

    /// Replies only after `delay`, for exercising the request timeout.
    pub fn stalling(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::replying("too late")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<Vec<ChatMessage>> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionGateway for FakeGateway {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(messages.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map_err(AppError::Gateway)
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Pool<Sqlite>,
    pub gateway: Arc<FakeGateway>,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(FakeGateway::replying("generated text")).await
}

pub async fn spawn_app_with(gateway: FakeGateway) -> TestApp {
    spawn_app_with_timeout(gateway, Duration::from_secs(10)).await
}

pub async fn spawn_app_with_timeout(gateway: FakeGateway, request_timeout: Duration) -> TestApp {
    // a single connection keeps the in-memory database alive and shared
    let pool = db::connect("sqlite::memory:", 1, 1).await.unwrap();
    db::migrate(&pool).await.unwrap();

    let gateway = Arc::new(gateway);
    let state = AppState {
        db: pool.clone(),
        gateway: gateway.clone(),
    };

    TestApp {
        router: create_router(state, request_timeout),
        db: pool,
        gateway,
    }
}

impl TestApp {
    pub async fn request(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.request("POST", uri).await
    }

    pub async fn insert_book(
        &self,
        title: &str,
        author: &str,
        publication_year: i64,
        price: f64,
        genre: &str,
    ) -> i64 {
        BookRepository::create(
            &self.db,
            &NewBook {
                title: title.to_string(),
                author: author.to_string(),
                publication_year,
                price,
                currency: Currency::Usd,
                genre: genre.to_string(),
            },
        )
        .await
        .unwrap()
    }

    pub async fn session_count(&self, email: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE email = ?")
            .bind(email)
            .fetch_one(&self.db)
            .await
            .unwrap()
    }

    /// Break a table so every statement touching it fails
    pub async fn drop_table(&self, table: &str) {
        sqlx::query(&format!("DROP TABLE {}", table))
            .execute(&self.db)
            .await
            .unwrap();
    }

    /// Sign up and return the session token
    pub async fn sign_up(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(&format!("/auth/signup?email={}&password={}", email, password))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}
