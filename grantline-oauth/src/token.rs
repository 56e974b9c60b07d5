//! Token endpoint response.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token response from an OAuth token endpoint.
///
/// Produced only by a successful exchange or refresh call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Absolute expiry derived from `expires_in` at receipt time.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs as i64))
    }

    /// Granted scopes as a list. GitHub separates with commas, Google
    /// with spaces; both are accepted.
    pub fn scope_list(&self) -> Vec<String> {
        self.scope
            .as_deref()
            .map(|s| {
                s.split([' ', ','])
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
