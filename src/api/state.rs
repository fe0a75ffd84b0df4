use std::sync::Arc;
use sqlx::{Pool, Sqlite};

use crate::completion::CompletionGateway;

/// Dependencies injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub gateway: Arc<dyn CompletionGateway>,
}
