//! GitHub Authorization-Code flow walkthrough.

use grantline_cli::display::redact;
use grantline_cli::prompt;
use grantline_oauth::{
    authorization_url, exchange_code, fetch_github_user, CapturedRedirect, FlowContext,
    OAuthConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grantline_cli::init_tracing();

    println!("🔐 GitHub Authorization Code flow");
    println!();
    println!("Enter your GitHub OAuth App credentials:");
    let client_id = prompt::read_required("Client ID: ")?;
    let client_secret = prompt::read_required("Client Secret: ")?;

    let config = OAuthConfig::github(client_id, client_secret);
    let context = FlowContext::new();

    println!();
    println!("✅ Using:");
    println!("   Client ID: {}", redact(&config.client_id, 10));
    println!("   Redirect URI: {}", config.redirect_uri);

    let auth_url = authorization_url(&config, &context);

    println!();
    println!("[1/4] Opening the authorization URL in your browser...");
    println!("   {auth_url}");
    if let Err(e) = webbrowser::open(&auth_url) {
        println!("⚠️  Could not open browser automatically: {e}");
        println!("   Please open the URL manually.");
    }

    println!();
    println!("[2/4] After you authorize, GitHub redirects you to:");
    println!("   {}?code=XYZ&state={}", config.redirect_uri, context.state);
    println!("   Copy the WHOLE URL from the browser address bar.");
    println!();
    let pasted = prompt::read_required("📋 Paste the full redirect URL: ")?;

    let redirect = match CapturedRedirect::from_pasted_url(&pasted) {
        Ok(redirect) => redirect,
        Err(e) => {
            eprintln!("❌ Could not read the redirect URL: {e}");
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
    println!("[3/4] Exchanging the authorization code for an access token...");
    let tokens = match exchange_code(&config, &redirect.code).await {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("❌ Token exchange failed: {e}");
            eprintln!("Possible causes:");
            eprintln!("  • wrong client secret");
            eprintln!("  • the code expired (GitHub codes last about 10 minutes)");
            eprintln!("  • the redirect URI does not match the registered one");
            std::process::exit(1);
        }
    };
    println!(
        "✅ Access token received: {}",
        redact(&tokens.access_token, 30)
    );

    println!();
    println!("[4/4] Requesting the protected resource...");
    let user = match fetch_github_user(&config.userinfo_url, &tokens.access_token).await {
        Ok(user) => user,
        Err(e) => {
            eprintln!("❌ API request failed: {e}");
            std::process::exit(1);
        }
    };

    println!();
    println!("🎉 Success! Authenticated user:");
    println!("   Login: {}", user.login);
    println!("   Name: {}", user.name.as_deref().unwrap_or("not set"));
    println!("   Company: {}", user.company.as_deref().unwrap_or("not set"));
    println!("   Public repos: {}", user.public_repos);
    println!("   Followers: {}", user.followers);
    println!();
    println!("   Authorization header used:");
    println!("   Bearer {}", redact(&tokens.access_token, 30));

    Ok(())
}
