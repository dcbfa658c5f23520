//! Persisted OAuth token record and its on-disk cache.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::{GoogleError, Result};

/// Tokens expiring within this window are treated as already expired.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Authorization credential reusable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl TokenRecord {
    /// A token without an expiry never expires.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry
            .is_none_or(|expiry| expiry - Duration::seconds(EXPIRY_SKEW_SECS) > now)
    }

    pub fn is_refreshable(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether the record was granted every scope in `required`.
    ///
    /// Records written without scope information are accepted.
    pub fn covers_scopes(&self, required: &[&str]) -> bool {
        self.scopes.is_empty()
            || required
                .iter()
                .all(|scope| self.scopes.iter().any(|s| s == scope))
    }
}

/// JSON file holding a single `TokenRecord`.
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when no cache file exists.
    pub fn load(&self) -> Result<Option<TokenRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.error(e.to_string()).into()),
        };

        let record = serde_json::from_str(&content).map_err(|e| self.error(e.to_string()))?;
        Ok(Some(record))
    }

    /// Atomically replace the cache file.
    ///
    /// The temp file is created with mode 0600 on Unix and keeps it after the rename.
    pub fn save(&self, record: &TokenRecord) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.error(e.to_string()))?;

        let json = serde_json::to_string_pretty(record).map_err(|e| self.error(e.to_string()))?;
        let mut file =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| self.error(e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| self.error(e.to_string()))?;
        file.persist(&self.path)
            .map_err(|e| self.error(e.error.to_string()))?;
        Ok(())
    }

    fn error(&self, message: String) -> GoogleError {
        GoogleError::TokenCache {
            path: self.path.clone(),
            message,
        }
    }
}
