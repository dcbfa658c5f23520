//! Minimal Sheets v4 client: create a spreadsheet and write a value grid.

use anyhow::Context;
use serde::Deserialize;
use serde_json::json;

use super::error::{GoogleError, Result, error_message};

const SPREADSHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    spreadsheet_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    #[serde(default)]
    pub updated_rows: u64,
    #[serde(default)]
    pub updated_cells: u64,
}

pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SheetsClient {
    pub fn new(base_url: &str, access_token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("issue-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Create an empty spreadsheet and return its generated id.
    pub async fn create_spreadsheet(&self, title: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/v4/spreadsheets", self.base_url))
            .query(&[("fields", "spreadsheetId")])
            .bearer_auth(&self.access_token)
            .json(&json!({ "properties": { "title": title } }))
            .send()
            .await
            .map_err(GoogleError::from)?;

        let body: CreateResponse = parse_response(response).await?;
        body.spreadsheet_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GoogleError::MissingSpreadsheetId.into())
    }

    /// Write `values` starting at cell A1 of the first sheet, as raw strings.
    pub async fn write_values(
        &self,
        spreadsheet_id: &str,
        values: &[Vec<String>],
    ) -> Result<UpdateResponse> {
        let response = self
            .http
            .put(format!(
                "{}/v4/spreadsheets/{spreadsheet_id}/values/A1",
                self.base_url
            ))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.access_token)
            .json(&json!({
                "range": "A1",
                "majorDimension": "ROWS",
                "values": values,
            }))
            .send()
            .await
            .map_err(GoogleError::from)?;

        parse_response(response).await
    }
}

/// Browser URL of a spreadsheet.
pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("{SPREADSHEET_URL_PREFIX}{spreadsheet_id}")
}

async fn parse_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GoogleError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        }
        .into());
    }
    Ok(response.json().await.map_err(GoogleError::from)?)
}
