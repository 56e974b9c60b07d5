//! Provider-issued client-secret document (Google flow).

use std::path::Path;

use serde::Deserialize;

/// Errors raised while loading the client-secret file.
#[derive(Debug, thiserror::Error)]
pub enum ClientSecretError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid client secret JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a `web` or `installed` section")]
    MissingSection,
}

/// Credentials from a Google Cloud console client-secret download.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Outer document shape: one section keyed by application type.
#[derive(Debug, Deserialize)]
struct ClientSecretDocument {
    #[serde(default)]
    web: Option<ClientSecret>,
    #[serde(default)]
    installed: Option<ClientSecret>,
}

impl ClientSecret {
    /// Load from a client-secret JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientSecretError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClientSecretError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a client-secret JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ClientSecretError> {
        let document: ClientSecretDocument = serde_json::from_str(raw)?;
        document
            .web
            .or(document.installed)
            .ok_or(ClientSecretError::MissingSection)
    }
}
