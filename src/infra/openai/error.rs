//! Chat-completion API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("Chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat completion API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Chat completion response contained no message")]
    EmptyCompletion,
}

pub type Result<T> = anyhow::Result<T>;

/// Extract `error.message` from an OpenAI-style error body, falling back to the raw body.
pub(super) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
