//! Chat-completion client over the OpenAI HTTP API.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::error::{OpenAiError, Result, error_message};

/// Text completion backend used by the issue analyzer.
///
/// The analyzer only needs "prompt in, free text out", so tests can swap in
/// a canned implementation.
pub trait CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Request parameters shared by every completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Production implementation using reqwest.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    settings: ChatSettings,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, settings: ChatSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("issue-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        tracing::debug!(model = %self.settings.model, "requesting chat completion");
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(OpenAiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            }
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(OpenAiError::from)?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| OpenAiError::EmptyCompletion.into())
    }
}
