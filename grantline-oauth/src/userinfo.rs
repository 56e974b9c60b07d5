//! Authenticated resource fetch: one GET to prove the token works.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Errors raised by the userinfo fetch.
#[derive(Debug, thiserror::Error)]
pub enum UserInfoError {
    #[error("userinfo endpoint returned HTTP {status}: {body}")]
    Endpoint {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// GitHub's API rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("grantline/", env!("CARGO_PKG_VERSION"));

/// Authenticated GitHub user, as returned by `/user`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

/// Google userinfo payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Fetch the authenticated GitHub user.
pub async fn fetch_github_user(
    userinfo_url: &str,
    access_token: &str,
) -> Result<GitHubUser, UserInfoError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    debug!(url = userinfo_url, "fetching authenticated GitHub user");

    let response = client
        .get(userinfo_url)
        .bearer_auth(access_token)
        .header("Accept", "application/vnd.github+json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(UserInfoError::Endpoint { status, body });
    }

    Ok(response.json().await?)
}

/// Fetch the Google userinfo document.
pub async fn fetch_google_userinfo(
    userinfo_url: &str,
    access_token: &str,
) -> Result<GoogleUserInfo, UserInfoError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    debug!(url = userinfo_url, "fetching Google userinfo");

    let response = client
        .get(userinfo_url)
        .bearer_auth(access_token)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(UserInfoError::Endpoint { status, body });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_github_user_is_fetched_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", "Bearer gho_tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "login": "octocat",
                "name": "The Octocat",
                "company": "GitHub",
                "public_repos": 8,
                "followers": 4000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = fetch_github_user(&format!("{}/user", server.uri()), "gho_tok")
            .await
            .unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.name.as_deref(), Some("The Octocat"));
        assert_eq!(user.public_repos, 8);
        assert_eq!(user.followers, 4000);
    }

    #[tokio::test]
    async fn test_github_null_fields_are_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "login": "octocat",
                "name": null,
                "company": null
            })))
            .mount(&server)
            .await;

        let user = fetch_github_user(&format!("{}/user", server.uri()), "gho_tok")
            .await
            .unwrap();
        assert!(user.name.is_none());
        assert_eq!(user.public_repos, 0);
    }

    #[tokio::test]
    async fn test_non_200_is_surfaced_as_endpoint_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"message":"Bad credentials"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = fetch_github_user(&format!("{}/user", server.uri()), "expired")
            .await
            .unwrap_err();
        match err {
            UserInfoError::Endpoint { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("Bad credentials"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_google_userinfo_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth2/v2/userinfo"))
            .and(header("Authorization", "Bearer ya29.tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1047",
                "email": "demo@example.com",
                "name": "Demo User"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let info =
            fetch_google_userinfo(&format!("{}/oauth2/v2/userinfo", server.uri()), "ya29.tok")
                .await
                .unwrap();
        assert_eq!(info.email.as_deref(), Some("demo@example.com"));
        assert_eq!(info.id.as_deref(), Some("1047"));
    }
}
