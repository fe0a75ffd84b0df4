//! Text-completion gateway used by the summary and recommendation endpoints.
//!
//! Every call is a single synchronous request: no retries, no caching, no
//! streaming. The gateway is a trait so the HTTP client can be swapped out.

pub mod groq;
pub mod prompt;

pub use groq::GroqGateway;
pub use prompt::{recommendation_prompt, summary_prompt, ReaderFeatures};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Model every completion request is sent to
pub const COMPLETION_MODEL: &str = "llama3-8b-8192";

/// Output budget for a single completion
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Submit the conversation and return the generated text untouched.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError>;
}
