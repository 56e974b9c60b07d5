//! Google Authorization-Code + Refresh-Token flow walkthrough.

use std::path::Path;

use grantline_cli::display::redact;
use grantline_cli::prompt;
use grantline_oauth::{
    authorization_url, exchange_code, fetch_google_userinfo, refresh_access_token,
    CapturedRedirect, ClientSecret, CredentialsFile, FlowContext, OAuthConfig, StoredCredentials,
};

const CLIENT_SECRET_FILE: &str = "google_client_secret.json";
const TOKENS_FILE: &str = "google_tokens.json";

fn print_client_secret_help() {
    println!();
    println!("❌ '{CLIENT_SECRET_FILE}' NOT FOUND!");
    println!();
    println!("How to get it:");
    println!("1. Go to https://console.cloud.google.com/");
    println!("2. Create a project (or pick an existing one)");
    println!("3. APIs & Services → Credentials");
    println!("4. Create Credentials → OAuth client ID");
    println!("5. Application type: Web application");
    println!("6. Add the authorized redirect URI:");
    println!("   http://localhost:8080/callback");
    println!("7. Download the JSON and save it as '{CLIENT_SECRET_FILE}'");
}

/// Pretty-printed credentials with the sensitive fields truncated or
/// masked.
fn redacted_preview(credentials: &StoredCredentials) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(credentials)?;
    if let Some(doc) = value.as_object_mut() {
        doc.insert("token".into(), redact(&credentials.token, 30).into());
        if let Some(refresh) = &credentials.refresh_token {
            doc.insert("refresh_token".into(), redact(refresh, 10).into());
        }
        doc.insert("client_secret".into(), "***HIDDEN***".into());
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grantline_cli::init_tracing();

    println!("🔐 Google Refresh Token flow");
    println!();
    println!("📋 Preparation:");
    println!("1. Make sure '{CLIENT_SECRET_FILE}' is in the working directory");
    println!("2. Check that the Google Cloud console lists the redirect URI:");
    println!("   http://localhost:8080/callback");

    if !Path::new(CLIENT_SECRET_FILE).exists() {
        print_client_secret_help();
        std::process::exit(1);
    }

    println!();
    println!("[1/5] Initializing the OAuth flow...");
    let secret = match ClientSecret::from_file(CLIENT_SECRET_FILE) {
        Ok(secret) => secret,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let config = OAuthConfig::google(&secret);
    let context = FlowContext::new();
    println!("✅ Flow initialized");

    println!();
    println!("[2/5] Building the authorization URL...");
    let auth_url = authorization_url(&config, &context);
    println!("✅ URL generated");
    println!("🔗 State parameter: {}", context.state);

    println!();
    println!("[3/5] Opening the browser for authorization...");
    println!("{auth_url}");
    if let Err(e) = webbrowser::open(&auth_url) {
        println!("⚠️  Could not open browser automatically: {e}");
        println!("   Please open the URL manually.");
    }
    println!();
    println!("Authorization steps:");
    println!("1. Sign in to your Google account");
    println!("2. Continue past the unverified-app warning");
    println!("3. Allow the requested access");
    println!("4. The browser lands on a dead page — that is expected");
    println!("5. Copy the WHOLE URL from the address bar");

    println!();
    println!("[4/5] Waiting for the callback URL...");
    println!("Example:");
    println!("http://localhost:8080/callback?state=XYZ&code=4/0Af...");
    println!();
    let pasted = prompt::read_required("👉 Paste the URL here: ")?;

    let redirect = match CapturedRedirect::from_pasted_url(&pasted) {
        Ok(redirect) => redirect,
        Err(e) => {
            eprintln!("❌ Could not read the callback URL: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = redirect.verify_state(&context.state) {
        eprintln!("❌ {e}");
        eprintln!("   The redirect does not belong to this run; aborting.");
        std::process::exit(1);
    }

    if context.is_expired() {
        println!("⚠️  More than five minutes have passed; the code may already be stale.");
    }

    println!();
    println!("[5/5] Exchanging the code for access and refresh tokens...");
    let tokens = match exchange_code(&config, &redirect.code).await {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("❌ Could not obtain tokens: {e}");
            eprintln!("Possible causes:");
            eprintln!("  • the authorization code expired (Google codes last about 5 minutes)");
            eprintln!("  • the redirect URI does not match the registered one");
            eprintln!("  • a problem with '{CLIENT_SECRET_FILE}'");
            std::process::exit(1);
        }
    };
    println!("✅ Tokens received!");

    let mut credentials = StoredCredentials::from_token_response(&config, &tokens);
    println!();
    println!("Received credentials:");
    println!("{}", redacted_preview(&credentials)?);

    let store = CredentialsFile::new(TOKENS_FILE);
    store.save(&credentials)?;
    println!();
    println!("💾 Full credentials saved to '{TOKENS_FILE}'");

    println!();
    println!("A. Requesting userinfo with the access token...");
    let info = match fetch_google_userinfo(&config.userinfo_url, &credentials.token).await {
        Ok(info) => info,
        Err(e) => {
            eprintln!("❌ API request failed: {e}");
            std::process::exit(1);
        }
    };
    println!("✅ Data received:");
    println!("   • Email: {}", info.email.as_deref().unwrap_or("not set"));
    println!("   • Name: {}", info.name.as_deref().unwrap_or("not set"));
    println!("   • ID: {}", info.id.as_deref().unwrap_or("not set"));

    println!();
    println!("B. Refreshing the access token with the refresh token...");
    let Some(refresh_token) = credentials.refresh_token.clone() else {
        eprintln!("❌ The provider granted no refresh token; nothing to refresh.");
        std::process::exit(1);
    };
    match refresh_access_token(
        &credentials.token_uri,
        &credentials.client_id,
        &credentials.client_secret,
        &refresh_token,
    )
    .await
    {
        Ok(new_tokens) => {
            println!("✅ Token refreshed!");
            println!(
                "   • New access token: {}",
                redact(&new_tokens.access_token, 30)
            );
            println!(
                "   • Valid for: {} seconds",
                new_tokens.expires_in.unwrap_or(3600)
            );
            credentials.record_refreshed_access_token(&new_tokens);
            store.save(&credentials)?;
            println!("💾 Credentials file updated");
        }
        Err(e) => {
            // The previously saved file stays as it was.
            eprintln!("❌ Refresh failed: {e}");
            std::process::exit(1);
        }
    }

    println!();
    println!("🎉 Walkthrough complete!");

    Ok(())
}
