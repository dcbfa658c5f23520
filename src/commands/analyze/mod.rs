//! `issue-digest analyze`: summarize cached issue exports into a CSV report.

mod analysis;
mod date;
mod error;
mod keywords;
mod models;
mod people;
mod process;
mod report;
#[cfg(test)]
mod testing;

pub use error::{AnalyzeError, Result};
pub use process::{AnalyzeSummary, FileOutcome};

use std::path::PathBuf;

use clap::Args;

use crate::infra::openai::{ChatSettings, OpenAiClient};
use crate::shared::config::AnalyzeConfig;
use crate::shared::env_var::EnvVars;
use process::{discover_files, run_analysis};
use report::ReportWriter;

#[derive(Args, Clone, PartialEq, Debug)]
pub struct AnalyzeArgs {
    /// Directory containing the issue exports
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Report file to write [default: issue_summary.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name pattern of issue exports [default: goose_issue_*.json]
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Chat-completion model [default: gpt-3.5-turbo]
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Everything the analyzer needs, validated before any file is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub api_key: String,
    pub input_dir: PathBuf,
    pub input_pattern: String,
    pub output: PathBuf,
    pub chat: ChatSettings,
}

impl AnalyzerConfig {
    /// Merge CLI flags over the config file; fails without an API key.
    pub fn resolve(
        args: &AnalyzeArgs,
        config: &AnalyzeConfig,
        env: &EnvVars,
    ) -> std::result::Result<Self, AnalyzeError> {
        let api_key = env
            .openai_api_key
            .clone()
            .ok_or(AnalyzeError::MissingApiKey)?;

        Ok(Self {
            api_key,
            input_dir: args.dir.clone(),
            input_pattern: args
                .pattern
                .clone()
                .unwrap_or_else(|| config.input_pattern.clone()),
            output: args.output.clone().unwrap_or_else(|| config.output.clone()),
            chat: ChatSettings {
                base_url: env
                    .openai_base_url
                    .clone()
                    .unwrap_or_else(|| config.api_base_url.clone()),
                model: args.model.clone().unwrap_or_else(|| config.model.clone()),
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
        })
    }
}

impl AnalyzeArgs {
    pub async fn run(&self, config: &AnalyzeConfig, env: &EnvVars) -> Result<()> {
        let analyzer = AnalyzerConfig::resolve(self, config, env)?;
        let summary = analyze(&analyzer).await?;

        for outcome in &summary.outcomes {
            if let FileOutcome::Skipped { path, reason } = outcome {
                eprintln!("skipped {}: {reason}", path.display());
            }
        }
        eprintln!(
            "{} written, {} skipped",
            summary.written(),
            summary.skipped()
        );
        println!(
            "Summary CSV has been created as '{}'",
            analyzer.output.display()
        );
        Ok(())
    }
}

/// Run the analyzer end to end against the real chat-completion API.
pub async fn analyze(config: &AnalyzerConfig) -> Result<AnalyzeSummary> {
    let client = OpenAiClient::new(config.api_key.clone(), config.chat.clone())?;
    let files = discover_files(&config.input_dir, &config.input_pattern)?;
    tracing::debug!(count = files.len(), "discovered issue exports");

    let mut writer = ReportWriter::create(&config.output)?;
    run_analysis(&client, &files, &mut writer).await
}
