//! Redirect capture from an operator-pasted URL.

use url::Url;

/// Errors raised while capturing the redirect.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("provider returned an error: {0}")]
    Provider(String),
    #[error("redirect URL is missing the `code` parameter")]
    MissingCode,
    #[error("redirect URL is missing the `state` parameter")]
    MissingState,
    #[error("state mismatch: expected {expected}, got {actual}")]
    StateMismatch { expected: String, actual: String },
}

/// Authorization code and state extracted from the redirect URL.
///
/// The code is used exactly once for the token exchange, then discarded.
#[derive(Debug, Clone)]
pub struct CapturedRedirect {
    /// Authorization code issued by the provider
    pub code: String,
    /// State parameter echoed back by the provider
    pub state: String,
}

impl CapturedRedirect {
    /// Parse the redirect URL the operator pasted from the browser
    /// address bar.
    ///
    /// Surrounding whitespace and shell quotes are stripped before
    /// parsing. A provider `error` parameter (e.g. `access_denied`)
    /// takes precedence over missing `code`/`state`.
    pub fn from_pasted_url(input: &str) -> Result<Self, CaptureError> {
        let cleaned = input.trim().trim_matches(|c| c == '"' || c == '\'');
        let url = Url::parse(cleaned)?;

        let mut code = None;
        let mut state = None;
        let mut provider_error = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => provider_error = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = provider_error {
            return Err(CaptureError::Provider(error));
        }

        Ok(Self {
            code: code.ok_or(CaptureError::MissingCode)?,
            state: state.ok_or(CaptureError::MissingState)?,
        })
    }

    /// Verify the echoed state against the one generated at flow start.
    ///
    /// A mismatch means the redirect cannot be trusted; the run must
    /// abort before any token request is made.
    pub fn verify_state(&self, expected: &str) -> Result<(), CaptureError> {
        if self.state != expected {
            return Err(CaptureError::StateMismatch {
                expected: expected.to_string(),
                actual: self.state.clone(),
            });
        }
        Ok(())
    }
}
