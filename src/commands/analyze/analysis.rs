//! Language-model summary and criticality judgment for one issue.

use indoc::formatdoc;

use super::models::IssueRecord;
use crate::infra::openai::CompletionClient;

/// Text written to the report when no summary is available.
pub const SUMMARY_FALLBACK: &str = "Failed to generate summary";

/// Outcome of the language-model call for one issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// `None` when the call failed; `Some("")` when the reply had no summary line.
    pub summary: Option<String>,
    pub critical: bool,
}

impl Analysis {
    /// Summary text for the report, substituting the fallback when empty.
    pub fn summary_or_fallback(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(SUMMARY_FALLBACK)
    }
}

/// Ask the model about `issue`. Failures are logged and yield `Analysis::default()`.
pub async fn analyze_issue(client: &impl CompletionClient, issue: &IssueRecord) -> Analysis {
    let prompt = build_prompt(issue);
    match client.complete(&prompt).await {
        Ok(reply) => parse_reply(&reply),
        Err(e) => {
            tracing::warn!(issue = issue.number, "Error getting AI analysis: {e:#}");
            Analysis::default()
        }
    }
}

pub fn build_prompt(issue: &IssueRecord) -> String {
    let labels = issue.label_names().collect::<Vec<_>>().join(", ");
    let labels = if labels.is_empty() {
        "No labels".to_string()
    } else {
        labels
    };

    formatdoc! {"
        Analyze this GitHub issue and provide:
        1. A concise summary (max 2 sentences)
        2. Whether this issue seems critical (true/false) based on:
           - Impact on users
           - Security implications
           - System stability
           - Data integrity
           - Blocking nature of the issue

        Title: {title}
        Labels: {labels}
        Body: {body}

        Respond in this format:
        Summary: <your_summary>
        Critical: <true/false>",
        title = issue.title,
        body = issue.body,
    }
}

/// Pick the `Summary:` and `Critical:` lines out of a reply; everything else is ignored.
///
/// A missing summary line leaves the summary empty and a missing or
/// non-`true` critical line means not critical. Later lines win.
pub fn parse_reply(reply: &str) -> Analysis {
    let mut summary = String::new();
    let mut critical = false;

    for line in reply.lines() {
        if let Some(rest) = line.strip_prefix("Summary:") {
            summary = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Critical:") {
            critical = rest.trim().eq_ignore_ascii_case("true");
        }
    }

    Analysis {
        summary: Some(summary),
        critical,
    }
}
