use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("{} environment variable is not set", crate::shared::env_var::EnvVars::openai_api_key_name())]
    MissingApiKey,

    #[error("Invalid issue record {}: {message}", path.display())]
    InvalidRecord { path: PathBuf, message: String },

    #[error("Invalid createdAt timestamp {value:?}: expected YYYY-MM-DDTHH:MM:SSZ")]
    InvalidDate { value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = anyhow::Result<T>;
