//! wiremock-based mock of the Google OAuth token endpoint and Sheets API.
//!
//! ```ignore
//! let mock = GoogleMockServer::start().await;
//! mock.token_endpoint("access", Some("refresh"), 3599).await;
//! mock.create_spreadsheet("Title", "sheet-id").await;
//! mock.write_values("sheet-id", 3).await;
//! ```

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::credentials::ClientSecret;
use super::oauth::OAuthClient;
use super::sheets::SheetsClient;

pub const TEST_ACCESS_TOKEN: &str = "ya29.test-access";

pub struct GoogleMockServer {
    server: MockServer,
}

impl GoogleMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client_secret(&self) -> ClientSecret {
        ClientSecret {
            client_id: "test-client.apps.googleusercontent.com".to_string(),
            client_secret: "test-secret".to_string(),
            auth_uri: format!("{}/auth", self.server.uri()),
            token_uri: format!("{}/token", self.server.uri()),
        }
    }

    /// Contents of a `credentials.json` pointing at this server.
    pub fn credentials_json(&self) -> String {
        let secret = self.client_secret();
        json!({
            "installed": {
                "client_id": secret.client_id,
                "client_secret": secret.client_secret,
                "auth_uri": secret.auth_uri,
                "token_uri": secret.token_uri,
                "redirect_uris": ["http://localhost"]
            }
        })
        .to_string()
    }

    pub fn oauth_client(&self) -> OAuthClient {
        OAuthClient::new(self.client_secret()).unwrap()
    }

    pub fn sheets_client(&self) -> SheetsClient {
        SheetsClient::new(&self.server.uri(), TEST_ACCESS_TOKEN).unwrap()
    }

    /// Mock POST /token for both refresh and code-exchange grants.
    pub async fn token_endpoint(&self, access_token: &str, refresh_token: Option<&str>, expires_in: i64) {
        let mut body = json!({
            "access_token": access_token,
            "expires_in": expires_in,
            "token_type": "Bearer",
        });
        if let Some(refresh) = refresh_token {
            body["refresh_token"] = json!(refresh);
        }
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("client_id=test-client.apps.googleusercontent.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn token_endpoint_error(&self, error: &str, description: &str) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": error,
                "error_description": description,
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock POST /v4/spreadsheets for a given title.
    pub async fn create_spreadsheet(&self, title: &str, spreadsheet_id: &str) {
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets"))
            .and(query_param("fields", "spreadsheetId"))
            .and(body_partial_json(json!({ "properties": { "title": title } })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "spreadsheetId": spreadsheet_id })),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn create_spreadsheet_without_id(&self) {
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&self.server)
            .await;
    }

    /// Mock PUT /v4/spreadsheets/{id}/values/A1.
    pub async fn write_values(&self, spreadsheet_id: &str, updated_rows: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/v4/spreadsheets/{spreadsheet_id}/values/A1")))
            .and(query_param("valueInputOption", "RAW"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "spreadsheetId": spreadsheet_id,
                "updatedRange": "Sheet1!A1",
                "updatedRows": updated_rows,
            })))
            .mount(&self.server)
            .await;
    }

    /// Every Sheets call fails with `status`.
    pub async fn sheets_error(&self, status: u16, message: &str) {
        Mock::given(path_regex(r"^/v4/spreadsheets"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "code": status, "message": message }
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    pub async fn last_request_body(&self) -> serde_json::Value {
        let requests = self.server.received_requests().await.unwrap();
        let last = requests.last().unwrap();
        serde_json::from_slice(&last.body).unwrap()
    }

    /// Authorization header of the last request, if any.
    pub async fn last_authorization(&self) -> Option<String> {
        let requests = self.server.received_requests().await?;
        requests
            .last()?
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}
