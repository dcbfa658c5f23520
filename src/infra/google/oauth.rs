//! OAuth 2.0 installed-app flow against Google's authorization server.

use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;

use super::callback::CallbackListener;
use super::credentials::ClientSecret;
use super::error::{GoogleError, Result, error_message};
use super::token::{TokenCache, TokenRecord};

/// Read/write access to spreadsheets, nothing else.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

impl TokenResponse {
    fn into_record(self, issued_at: DateTime<Utc>, previous_refresh: Option<String>) -> TokenRecord {
        TokenRecord {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expiry: self
                .expires_in
                .map(|secs| issued_at + chrono::Duration::seconds(secs)),
            scopes: self
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_else(|| vec![SHEETS_SCOPE.to_string()]),
        }
    }
}

/// How the token returned by `acquire_token` was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Cached,
    Refreshed,
    Authorized,
}

pub struct OAuthClient {
    http: reqwest::Client,
    secret: ClientSecret,
}

impl OAuthClient {
    pub fn new(secret: ClientSecret) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("issue-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, secret })
    }

    /// Consent page URL for the given redirect target.
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.secret.auth_uri,
            &[
                ("response_type", "code"),
                ("client_id", self.secret.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("scope", SHEETS_SCOPE),
                ("state", state),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| {
            GoogleError::OAuth {
                error: "invalid_auth_uri".to_string(),
                description: e.to_string(),
            }
            .into()
        })
    }

    /// Exchange a refresh token for a fresh access token.
    pub async fn refresh(&self, record: &TokenRecord) -> Result<TokenRecord> {
        let refresh_token = record.refresh_token.clone().ok_or_else(|| GoogleError::OAuth {
            error: "invalid_grant".to_string(),
            description: "no refresh token cached".to_string(),
        })?;

        let issued_at = Utc::now();
        let response = self
            .token_request(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
            ])
            .await?;
        Ok(response.into_record(issued_at, Some(refresh_token)))
    }

    /// Exchange an authorization code received on `redirect_uri`.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenRecord> {
        let issued_at = Utc::now();
        let response = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
            ])
            .await?;
        Ok(response.into_record(issued_at, None))
    }

    /// Run the browser consent flow with a loopback redirect.
    pub async fn authorize_interactively(&self) -> Result<TokenRecord> {
        let listener = CallbackListener::bind().await?;
        let redirect_uri = listener.redirect_uri();
        let state = uuid::Uuid::new_v4().to_string();
        let url = self.authorization_url(&redirect_uri, &state)?;

        eprintln!("Please visit this URL to authorize this application:\n{url}");
        if let Err(e) = open::that(url.as_str()) {
            tracing::debug!("could not open a browser: {e}");
        }

        let code = listener.wait_for_code(&state, CALLBACK_TIMEOUT).await?;
        self.exchange_code(&code, &redirect_uri).await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .http
            .post(&self.secret.token_uri)
            .form(form)
            .send()
            .await
            .map_err(GoogleError::from)?;

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
}

/// Load a usable access token, refreshing or re-authorizing as needed.
///
/// Any newly obtained token is written back to `cache`.
pub async fn acquire_token(
    cache: &TokenCache,
    oauth: &OAuthClient,
) -> Result<(TokenRecord, TokenSource)> {
    let cached = cache.load()?.filter(|t| t.covers_scopes(&[SHEETS_SCOPE]));

    let (record, source) = match cached {
        Some(token) if token.is_valid_at(Utc::now()) => {
            tracing::debug!(path = %cache.path().display(), "using cached token");
            return Ok((token, TokenSource::Cached));
        }
        Some(token) if token.is_refreshable() => {
            tracing::info!("cached token expired, refreshing");
            (oauth.refresh(&token).await?, TokenSource::Refreshed)
        }
        _ => {
            tracing::info!("no usable cached token, starting authorization");
            (oauth.authorize_interactively().await?, TokenSource::Authorized)
        }
    };

    cache.save(&record)?;
    Ok((record, source))
}
