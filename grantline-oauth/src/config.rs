//! OAuth provider configuration.

use crate::client_secret::ClientSecret;

/// Configuration for one provider's Authorization-Code flow.
///
/// Created once at flow start and treated as immutable for the rest of
/// the run.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// Provider label (e.g. "github", "google")
    pub provider: String,
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Userinfo endpoint URL used to prove the token works
    pub userinfo_url: String,
    /// Redirect URI registered with the provider
    pub redirect_uri: String,
    /// Requested scopes
    pub scopes: Vec<String>,
    /// Provider-specific extra authorization parameters
    pub extra_params: Vec<(String, String)>,
}

impl OAuthConfig {
    /// GitHub OAuth App configuration.
    ///
    /// The redirect URI must match the one registered for the app.
    pub fn github(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            provider: "github".to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            userinfo_url: "https://api.github.com/user".to_string(),
            redirect_uri: "http://localhost:8000/callback".to_string(),
            scopes: vec!["read:user".to_string()],
            extra_params: Vec::new(),
        }
    }

    /// Google OAuth configuration, seeded from a client-secret document.
    ///
    /// Requests offline access with a forced consent screen so the token
    /// response carries a refresh token.
    pub fn google(secret: &ClientSecret) -> Self {
        Self {
            provider: "google".to_string(),
            client_id: secret.client_id.clone(),
            client_secret: secret.client_secret.clone(),
            auth_url: secret.auth_uri.clone(),
            token_url: secret.token_uri.clone(),
            userinfo_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
            redirect_uri: "http://localhost:8080/callback".to_string(),
            scopes: vec![
                "https://www.googleapis.com/auth/userinfo.email".to_string(),
                "https://www.googleapis.com/auth/userinfo.profile".to_string(),
                "openid".to_string(),
            ],
            extra_params: vec![
                ("access_type".to_string(), "offline".to_string()),
                ("prompt".to_string(), "consent".to_string()),
                ("include_granted_scopes".to_string(), "true".to_string()),
            ],
        }
    }

    /// Set the redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }

    /// Set the requested scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Scopes joined the way the `scope` query parameter expects.
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_config_defaults() {
        let config = OAuthConfig::github("id-123", "secret-456");
        assert_eq!(config.provider, "github");
        assert_eq!(config.redirect_uri, "http://localhost:8000/callback");
        assert_eq!(config.scope_param(), "read:user");
        assert!(config.extra_params.is_empty());
    }

    #[test]
    fn test_google_config_requests_offline_access() {
        let secret = ClientSecret {
            client_id: "g-id".to_string(),
            client_secret: "g-secret".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };
        let config = OAuthConfig::google(&secret);
        assert_eq!(config.token_url, "https://oauth2.googleapis.com/token");
        assert!(config
            .extra_params
            .contains(&("access_type".to_string(), "offline".to_string())));
        assert!(config
            .extra_params
            .contains(&("prompt".to_string(), "consent".to_string())));
        assert!(config.scope_param().contains("openid"));
    }

    #[test]
    fn test_with_redirect_uri_overrides_default() {
        let config = OAuthConfig::github("id", "secret")
            .with_redirect_uri("http://localhost:9999/cb");
        assert_eq!(config.redirect_uri, "http://localhost:9999/cb");
    }
}
