//! Token endpoint calls: code exchange and refresh.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::OAuthConfig;
use crate::token::TokenResponse;

/// Errors raised by the token endpoint calls.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("token endpoint returned HTTP {status}: {body}")]
    TokenEndpoint {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("token endpoint reported an error: {0}")]
    Provider(String),
    #[error("invalid token response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error document some providers put in an otherwise successful reply.
#[derive(Debug, Deserialize)]
struct TokenEndpointError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Decode a token endpoint reply.
///
/// GitHub answers a bad or expired code with HTTP 200 and an `error`
/// field in the body, so a successful status alone proves nothing; the
/// body is checked for an error document before it is read as tokens.
async fn decode_token_response(response: reqwest::Response) -> Result<TokenResponse, OAuthError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(OAuthError::TokenEndpoint { status, body });
    }

    if let Ok(error) = serde_json::from_str::<TokenEndpointError>(&body) {
        let message = match error.error_description {
            Some(description) => format!("{}: {}", error.error, description),
            None => error.error,
        };
        return Err(OAuthError::Provider(message));
    }

    Ok(serde_json::from_str(&body)?)
}

/// Exchange an authorization code for tokens.
///
/// One form-urlencoded POST; the call is made exactly once and a
/// failure aborts the run. The `Accept: application/json` header is
/// required by GitHub, which otherwise answers form-encoded, and is
/// harmless elsewhere.
pub async fn exchange_code(config: &OAuthConfig, code: &str) -> Result<TokenResponse, OAuthError> {
    let client = Client::new();

    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", &config.redirect_uri),
        ("client_id", &config.client_id),
        ("client_secret", &config.client_secret),
    ];

    debug!(provider = %config.provider, "exchanging authorization code");

    let response = client
        .post(&config.token_url)
        .header("Accept", "application/json")
        .form(&params)
        .send()
        .await?;

    let tokens = decode_token_response(response).await?;
    debug!(provider = %config.provider, "authorization code exchanged");
    Ok(tokens)
}

/// Refresh an access token with a refresh grant.
///
/// The caller owns persistence of the returned tokens; on failure the
/// previously stored credentials must be left untouched.
pub async fn refresh_access_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<TokenResponse, OAuthError> {
    let client = Client::new();

    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    debug!("refreshing access token");

    let response = client
        .post(token_url)
        .header("Accept", "application/json")
        .form(&params)
        .send()
        .await?;

    decode_token_response(response).await
}
