//! Test factories and canned completion clients for the analyzer.
//!
//! ```ignore
//! let issue = factories::issue_with(|i| {
//!     i.number = 7;
//!     i.title = "Custom Title".to_string();
//! });
//! ```

use std::cell::Cell;

use crate::infra::openai::CompletionClient;

pub mod factories {
    use crate::commands::analyze::models::{Author, Comment, IssueRecord, Label};

    /// Create an IssueRecord with default test values.
    pub fn issue() -> IssueRecord {
        IssueRecord {
            number: 1,
            title: "Test Issue".to_string(),
            body: "Test body".to_string(),
            state: "OPEN".to_string(),
            created_at: "2024-01-15T10:30:00Z".to_string(),
            url: "https://github.com/block/goose/issues/1".to_string(),
            labels: vec![Label {
                name: "bug".to_string(),
            }],
            assignees: vec![],
            comments: vec![Comment {
                author: Some(Author {
                    login: Some("commenter".to_string()),
                }),
            }],
            author: Some(Author {
                login: Some("testuser".to_string()),
            }),
        }
    }

    /// Create an IssueRecord with customizations applied via closure.
    pub fn issue_with(f: impl FnOnce(&mut IssueRecord)) -> IssueRecord {
        let mut i = issue();
        f(&mut i);
        i
    }

    /// Serialized export of `issue`, as found on disk.
    pub fn issue_json(issue: &IssueRecord) -> String {
        serde_json::to_string_pretty(issue).unwrap()
    }
}

/// Always fails, like an unreachable API.
pub struct FailingClient;

impl CompletionClient for FailingClient {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("connection refused")
    }
}

/// Returns the same reply every time and counts calls.
pub struct CannedClient {
    reply: String,
    calls: Cell<usize>,
}

impl CannedClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl CompletionClient for CannedClient {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.reply.clone())
    }
}
