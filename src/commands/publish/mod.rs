//! `issue-digest publish`: copy the report CSV into a new Google spreadsheet.

mod error;
mod table;

pub use error::{PublishError, Result};

use std::path::{Path, PathBuf};

use clap::Args;

use crate::infra::google::{
    ClientSecret, OAuthClient, SheetsClient, TokenCache, acquire_token, spreadsheet_url,
};
use crate::shared::config::{Config, PublishConfig};
use table::ValueGrid;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct PublishArgs {
    /// Report CSV to upload [default: the analyze output]
    #[arg(short, long)]
    pub csv: Option<PathBuf>,

    /// Title of the new spreadsheet [default: Goose Issues Summary]
    #[arg(short, long)]
    pub title: Option<String>,

    /// OAuth client secret file [default: credentials.json]
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Cached authorization token [default: token.json]
    #[arg(long)]
    pub token: Option<PathBuf>,
}

/// Validated publisher settings; the client secret is already loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    pub csv: PathBuf,
    pub title: String,
    pub secret: ClientSecret,
    pub token_path: PathBuf,
    pub sheets_base_url: String,
}

impl PublisherConfig {
    /// Merge CLI flags over the config file; fails if the client secret file is missing.
    ///
    /// Without `--csv` the report written by `analyze` (`report`) is uploaded.
    pub fn resolve(args: &PublishArgs, config: &PublishConfig, report: &Path) -> Result<Self> {
        let credentials = args
            .credentials
            .clone()
            .unwrap_or_else(|| config.credentials_path.clone());
        if !credentials.is_file() {
            return Err(PublishError::MissingCredentials(credentials).into());
        }

        Ok(Self {
            csv: args.csv.clone().unwrap_or_else(|| report.to_path_buf()),
            title: args.title.clone().unwrap_or_else(|| config.title.clone()),
            secret: ClientSecret::load(&credentials)?,
            token_path: args
                .token
                .clone()
                .unwrap_or_else(|| config.token_path.clone()),
            sheets_base_url: config.sheets_base_url.clone(),
        })
    }
}

impl PublishArgs {
    /// Failures are returned to `main`, which reports them.
    pub async fn run(&self, config: &Config) -> Result<()> {
        let publisher = PublisherConfig::resolve(self, &config.publish, &config.analyze.output)?;

        let url = publish(&publisher).await?;
        println!("Spreadsheet created successfully!");
        println!("URL: {url}");
        Ok(())
    }
}

/// Authenticate, create the spreadsheet and fill it; returns its browser URL.
pub async fn publish(config: &PublisherConfig) -> Result<String> {
    let grid = ValueGrid::from_path(&config.csv)?;
    tracing::debug!(
        rows = grid.data_rows(),
        columns = grid.header().len(),
        "loaded report table"
    );

    let oauth = OAuthClient::new(config.secret.clone())?;
    let cache = TokenCache::new(&config.token_path);
    let (token, source) = acquire_token(&cache, &oauth).await?;
    tracing::debug!(?source, "obtained access token");

    let sheets = SheetsClient::new(&config.sheets_base_url, token.access_token)?;
    upload(&sheets, &config.title, &grid).await
}

async fn upload(sheets: &SheetsClient, title: &str, grid: &ValueGrid) -> Result<String> {
    let spreadsheet_id = sheets.create_spreadsheet(title).await?;
    tracing::info!(%spreadsheet_id, "created spreadsheet");

    let updated = sheets.write_values(&spreadsheet_id, grid.rows()).await?;
    tracing::info!(
        rows = updated.updated_rows,
        cells = updated.updated_cells,
        "wrote report values"
    );

    Ok(spreadsheet_url(&spreadsheet_id))
}
