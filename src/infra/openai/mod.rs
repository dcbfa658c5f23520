//! Chat-completion API client used for issue summaries.

mod client;
pub(crate) mod error;
#[cfg(test)]
pub mod mock;

pub use client::{ChatSettings, CompletionClient, OpenAiClient};
