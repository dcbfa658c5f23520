//! OAuth client secret file (`credentials.json`) as downloaded from the
//! Google Cloud console.

use std::path::Path;

use reqwest::Url;
use serde::Deserialize;

use super::error::{GoogleError, Result};

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Client identity used for the installed-app authorization flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

/// The console wraps the secret in either an `installed` or a `web` object.
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ClientSecret {
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GoogleError::CredentialsNotFound(path.to_path_buf()).into());
            }
            Err(e) => {
                return Err(GoogleError::InvalidCredentials {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into());
            }
        };
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let invalid = |message: String| GoogleError::InvalidCredentials {
            path: path.to_path_buf(),
            message,
        };

        let file: ClientSecretFile =
            serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let secret = file
            .installed
            .or(file.web)
            .ok_or_else(|| invalid("expected an \"installed\" or \"web\" client".to_string()))?;

        for (field, uri) in [("auth_uri", &secret.auth_uri), ("token_uri", &secret.token_uri)] {
            Url::parse(uri).map_err(|e| invalid(format!("invalid {field} {uri:?}: {e}")))?;
        }
        Ok(secret)
    }
}
