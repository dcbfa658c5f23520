//! Centralized reader for the environment variables issue-digest consults.
//!
//! Variable names are private constants; callers read values through `EnvVars`.

const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
const LOG_FILTER: &str = "ISSUE_DIGEST_LOG";

/// Snapshot of the relevant environment variables at load time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvVars {
    /// API key for the chat-completion service.
    pub openai_api_key: Option<String>,

    /// Overrides the configured chat-completion base URL.
    pub openai_base_url: Option<String>,

    /// tracing filter directive, e.g. "debug" or "issue_digest=trace".
    pub log_filter: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl EnvVars {
    /// Read all relevant environment variables from the current process.
    pub fn load() -> Self {
        Self {
            openai_api_key: non_empty_var(OPENAI_API_KEY),
            openai_base_url: non_empty_var(OPENAI_BASE_URL),
            log_filter: non_empty_var(LOG_FILTER),
        }
    }

    /// Returns the name of the API key variable (used in error messages).
    pub fn openai_api_key_name() -> &'static str {
        OPENAI_API_KEY
    }
}
