//! Authorization URL construction.

use crate::config::OAuthConfig;
use crate::context::FlowContext;

/// Build the provider authorization URL.
///
/// The query carries exactly `response_type`, `client_id`,
/// `redirect_uri`, `scope` and `state`, plus whatever extra parameters
/// the provider configuration asks for. Pure string construction; no
/// error conditions.
pub fn authorization_url(config: &OAuthConfig, context: &FlowContext) -> String {
    let mut params = vec![
        ("response_type", "code".to_string()),
        ("client_id", config.client_id.clone()),
        ("redirect_uri", config.redirect_uri.clone()),
        ("scope", config.scope_param()),
        ("state", context.state.clone()),
    ];

    for (key, value) in &config.extra_params {
        params.push((key.as_str(), value.clone()));
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.auth_url, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use url::Url;

    fn query_map(raw: &str) -> HashMap<String, String> {
        Url::parse(raw)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_url_contains_exactly_the_configured_params() {
        let config = OAuthConfig::github("my-client", "my-secret");
        let context = FlowContext::new();
        let url = authorization_url(&config, &context);

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        let params = query_map(&url);
        assert_eq!(params.len(), 5);
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "my-client");
        assert_eq!(params["redirect_uri"], "http://localhost:8000/callback");
        assert_eq!(params["scope"], "read:user");
        assert_eq!(params["state"], context.state);
        assert!(!params["state"].is_empty());
    }

    #[test]
    fn test_state_differs_between_runs() {
        let config = OAuthConfig::github("my-client", "my-secret");
        let first = query_map(&authorization_url(&config, &FlowContext::new()));
        let second = query_map(&authorization_url(&config, &FlowContext::new()));
        assert_ne!(first["state"], second["state"]);
    }

    #[test]
    fn test_extra_params_are_appended() {
        let secret = crate::ClientSecret {
            client_id: "g-id".to_string(),
            client_secret: "g-secret".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };
        let config = OAuthConfig::google(&secret);
        let params = query_map(&authorization_url(&config, &FlowContext::new()));
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["prompt"], "consent");
        assert_eq!(params["include_granted_scopes"], "true");
    }

    #[test]
    fn test_scopes_are_space_joined_and_encoded() {
        let config = OAuthConfig::github("id", "secret").with_scopes(vec![
            "read:user".to_string(),
            "user:email".to_string(),
        ]);
        let url = authorization_url(&config, &FlowContext::new());
        assert!(url.contains("scope=read%3Auser%20user%3Aemail"));
    }
}
