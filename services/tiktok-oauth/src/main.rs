//! TikTok OAuth operator CLI
//!
//! Loads the app registration from TOML, builds one shared client and runs
//! a single provider operation, printing the result as JSON on stdout.
//! Logs go to stderr as JSON lines.

mod command;
mod config;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};
use tiktok_auth::{TOKEN_TYPE, TikTokClient, Token};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::{Cli, Command};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config_path.as_deref());
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        client_key = %config.client.client_key,
        redirect_url = %config.client.redirect_url,
        scopes = config.client.scopes.len(),
        timeout_secs = config.client.timeout_secs,
        "configuration loaded"
    );

    let client =
        TikTokClient::with_timeout(config.timeout()).context("failed to build HTTP client")?;
    let output = run(&client, &config, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Execute one command against the provider.
async fn run(client: &TikTokClient, config: &Config, command: Command) -> Result<Value> {
    match command {
        Command::AuthorizeUrl { state } => {
            let state = state.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let url = config.oauth_config()?.authorization_url(&state)?;
            Ok(json!({ "authorization_url": url, "state": state }))
        }
        Command::Exchange { code } => {
            let oauth = config.oauth_config()?;
            let token = client.exchange_code(&oauth, &code).await?;
            Ok(token_json(&token))
        }
        Command::Refresh { refresh_token } => {
            let token = client
                .refresh_token(&config.client.client_key, &refresh_token)
                .await?;
            Ok(token_json(&token))
        }
        Command::Revoke {
            access_token,
            open_id,
        } => {
            let token = bare_token(access_token, open_id);
            client.revoke_access(&token).await?;
            Ok(json!({ "revoked": true, "open_id": token.open_id()? }))
        }
        Command::UserInfo {
            access_token,
            open_id,
        } => {
            let user = client.fetch_user_info(&bare_token(access_token, open_id)).await?;
            Ok(serde_json::to_value(user)?)
        }
    }
}

/// Token rebuilt from CLI input; only the access token and open id matter.
fn bare_token(access_token: String, open_id: String) -> Token {
    Token::new(access_token, TOKEN_TYPE, "", SystemTime::now()).with_extra("open_id", open_id)
}

fn token_json(token: &Token) -> Value {
    let expires_at = token
        .expiry
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    json!({
        "access_token": token.access_token,
        "token_type": token.token_type,
        "refresh_token": token.refresh_token,
        "expires_at": expires_at,
        "open_id": token.open_id().ok(),
        "scope": token.scope().ok(),
        "refresh_expires_in": token.refresh_expires_in().ok(),
    })
}
