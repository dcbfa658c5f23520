//! Google OAuth and Sheets API error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoogleError {
    #[error("credentials file not found: {}", .0.display())]
    CredentialsNotFound(PathBuf),

    #[error("Invalid credentials file {}: {message}", path.display())]
    InvalidCredentials { path: PathBuf, message: String },

    #[error("Token cache {} error: {message}", path.display())]
    TokenCache { path: PathBuf, message: String },

    #[error("OAuth error: {error} ({description})")]
    OAuth { error: String, description: String },

    #[error("Timed out waiting for the OAuth authorization callback")]
    CallbackTimeout,

    #[error("Google API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Spreadsheet created but no spreadsheetId in response")]
    MissingSpreadsheetId,
}

pub type Result<T> = anyhow::Result<T>;

/// Extract a readable message from a Google API error body.
///
/// Handles both the Sheets shape (`{"error": {"message": ...}}`) and the
/// OAuth token endpoint shape (`{"error": "...", "error_description": ...}`).
pub(super) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let error = value.get("error");
    if let Some(message) = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return message.to_string();
    }

    match (
        error.and_then(|e| e.as_str()),
        value.get("error_description").and_then(|d| d.as_str()),
    ) {
        (Some(code), Some(description)) => format!("{code}: {description}"),
        (Some(code), None) => code.to_string(),
        _ => body.trim().to_string(),
    }
}
