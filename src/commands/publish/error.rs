use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Steps printed when the OAuth client secret file is missing.
const CREDENTIALS_HELP: &str = "\
Please follow these steps:
1. Go to https://console.cloud.google.com/
2. Create a new project or select an existing one
3. Enable the Google Sheets API
4. Create credentials (OAuth 2.0 Client ID)
5. Download the credentials and save as 'credentials.json' in this directory";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("{} file not found!\n{CREDENTIALS_HELP}", .0.display())]
    MissingCredentials(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadTable { path: PathBuf, source: csv::Error },

    #[error("{} has no header row", .0.display())]
    EmptyTable(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = anyhow::Result<T>;
