//! OAuth2 flow primitives for the grantline walkthroughs.
//!
//! This crate implements the pieces of an interactive Authorization-Code
//! flow where the operator carries the redirect URL between browser and
//! terminal by hand:
//!
//! - [`OAuthConfig`]: Per-provider configuration (endpoints, credentials, scopes)
//! - [`FlowContext`]: Anti-forgery state for an in-progress flow
//! - [`authorization_url`]: Builds the provider authorization URL
//! - [`CapturedRedirect`]: Code and state extracted from the pasted redirect URL
//! - [`exchange_code`] / [`refresh_access_token`]: Token endpoint calls
//! - [`fetch_github_user`] / [`fetch_google_userinfo`]: Authenticated resource fetch
//! - [`CredentialsFile`]: Plaintext JSON persistence of [`StoredCredentials`]
//!
//! Every step either advances or fails the run; nothing here retries.

mod authorize;
mod client_secret;
pub mod config;
mod context;
mod exchange;
mod redirect;
mod store;
mod token;
mod userinfo;

pub use authorize::authorization_url;
pub use client_secret::{ClientSecret, ClientSecretError};
pub use config::OAuthConfig;
pub use context::FlowContext;
pub use exchange::{exchange_code, refresh_access_token, OAuthError};
pub use redirect::{CaptureError, CapturedRedirect};
pub use store::{CredentialsFile, StoreError, StoredCredentials};
pub use token::TokenResponse;
pub use userinfo::{fetch_github_user, fetch_google_userinfo, GitHubUser, GoogleUserInfo, UserInfoError};
