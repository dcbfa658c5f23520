use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use super::dirs;

/// Top-level configuration for issue-digest.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Settings for `issue-digest analyze`.
    #[serde(default)]
    pub analyze: AnalyzeConfig,

    /// Settings for `issue-digest publish`.
    #[serde(default)]
    pub publish: PublishConfig,
}

/// Issue analysis configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeConfig {
    /// File name pattern of issue exports; `*` matches any run of characters
    /// (default: "goose_issue_*.json").
    #[serde(default = "default_input_pattern")]
    #[schemars(default = "default_input_pattern")]
    pub input_pattern: String,

    /// Report file to write (default: "issue_summary.csv").
    #[serde(default = "default_report_file")]
    #[schemars(default = "default_report_file")]
    pub output: PathBuf,

    /// Chat-completion model (default: "gpt-3.5-turbo").
    #[serde(default = "default_model")]
    #[schemars(default = "default_model")]
    pub model: String,

    /// Upper bound on completion tokens (default: 150).
    #[serde(default = "default_max_tokens")]
    #[schemars(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (default: 0.5).
    #[serde(default = "default_temperature")]
    #[schemars(default = "default_temperature")]
    pub temperature: f32,

    /// Chat-completion API base URL (default: "https://api.openai.com/v1").
    #[serde(default = "default_api_base_url")]
    #[schemars(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            input_pattern: default_input_pattern(),
            output: default_report_file(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_base_url: default_api_base_url(),
        }
    }
}

/// Spreadsheet publishing configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Title of the created spreadsheet (default: "Goose Issues Summary").
    #[serde(default = "default_title")]
    #[schemars(default = "default_title")]
    pub title: String,

    /// OAuth client secret file (default: "credentials.json").
    #[serde(default = "default_credentials_path")]
    #[schemars(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Cached authorization token (default: "token.json").
    #[serde(default = "default_token_path")]
    #[schemars(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Sheets API base URL (default: "https://sheets.googleapis.com").
    #[serde(default = "default_sheets_base_url")]
    #[schemars(default = "default_sheets_base_url")]
    pub sheets_base_url: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            credentials_path: default_credentials_path(),
            token_path: default_token_path(),
            sheets_base_url: default_sheets_base_url(),
        }
    }
}

fn default_input_pattern() -> String {
    "goose_issue_*.json".to_string()
}

fn default_report_file() -> PathBuf {
    PathBuf::from("issue_summary.csv")
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    0.5
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_title() -> String {
    "Goose Issues Summary".to_string()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Load configuration from ~/.config/issue-digest/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let Some(dir) = dirs::app_config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in &["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(Into::into)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
