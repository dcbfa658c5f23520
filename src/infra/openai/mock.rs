//! wiremock-based chat-completion mock server for testing.
//!
//! ```ignore
//! let mock = OpenAiMockServer::start().await;
//! mock.completion("Summary: ...\nCritical: false").await;
//! let client = mock.client();
//! ```

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::{ChatSettings, OpenAiClient};

pub const TEST_API_KEY: &str = "sk-test";

pub struct OpenAiMockServer {
    server: MockServer,
}

impl OpenAiMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Settings pointing at this server with the default model parameters.
    pub fn settings(&self) -> ChatSettings {
        ChatSettings {
            base_url: format!("{}/v1", self.server.uri()),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 150,
            temperature: 0.5,
        }
    }

    pub fn client(&self) -> OpenAiClient {
        OpenAiClient::new(TEST_API_KEY, self.settings()).unwrap()
    }

    /// Respond to every completion request with `content`.
    pub async fn completion(&self, content: &str) {
        self.raw_response(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        }))
        .await;
    }

    pub async fn raw_response(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", format!("Bearer {TEST_API_KEY}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn failure(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "message": message, "type": "invalid_request_error" }
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    pub async fn last_request_body(&self) -> serde_json::Value {
        let requests = self.server.received_requests().await.unwrap();
        let last = requests.last().unwrap();
        serde_json::from_slice(&last.body).unwrap()
    }
}
