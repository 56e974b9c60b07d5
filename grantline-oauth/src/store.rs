//! Credentials persistence (Google flow).
//!
//! One plaintext JSON file, overwritten whole. Concurrent runs would
//! race on it; a run is one operator at one terminal.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OAuthConfig;
use crate::token::TokenResponse;

/// Errors raised by credentials persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid credentials JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted credentials document.
///
/// Carries everything a later refresh needs alongside the tokens
/// themselves. Stored in plaintext; this is a demonstration flow, not
/// a secret store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredCredentials {
    /// Build the document from a successful token exchange.
    pub fn from_token_response(config: &OAuthConfig, tokens: &TokenResponse) -> Self {
        let granted = tokens.scope_list();
        Self {
            token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            token_uri: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes: if granted.is_empty() {
                config.scopes.clone()
            } else {
                granted
            },
            expiry: tokens.expires_at(),
        }
    }

    /// Overwrite the access token and expiry after a refresh grant.
    ///
    /// The refresh token is kept unless the provider rotated it.
    pub fn record_refreshed_access_token(&mut self, tokens: &TokenResponse) {
        self.token = tokens.access_token.clone();
        self.expiry = tokens.expires_at();
        if let Some(rotated) = &tokens.refresh_token {
            self.refresh_token = Some(rotated.clone());
        }
    }

    /// Check if the access token is expired.
    pub fn is_expired(&self) -> bool {
        match self.expiry {
            Some(expiry) => Utc::now() >= expiry,
            None => false,
        }
    }

    /// Check if the access token expires within the given seconds.
    pub fn expires_within(&self, seconds: i64) -> bool {
        match self.expiry {
            Some(expiry) => Utc::now() >= expiry - chrono::Duration::seconds(seconds),
            None => false,
        }
    }
}

/// Load/save handle for the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    /// Create a handle for the given path. Nothing is touched on disk
    /// until [`save`](Self::save) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path backing this handle.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the credentials as pretty-printed JSON, replacing any
    /// previous file.
    pub fn save(&self, credentials: &StoredCredentials) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    /// Load previously saved credentials. `Ok(None)` if the file does
    /// not exist.
    pub fn load(&self) -> Result<Option<StoredCredentials>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}
