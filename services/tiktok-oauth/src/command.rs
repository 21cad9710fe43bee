//! Command-line parsing
//!
//! `tiktok-oauth [--config PATH] <command> [--flag value]...`

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tiktok-oauth")]
#[command(about = "Run one TikTok OAuth call and print the result as JSON")]
pub struct Cli {
    /// Config file (defaults to TIKTOK_OAUTH_CONFIG, then tiktok-oauth.toml)
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// One provider operation per invocation
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the authorization URL. `state` defaults to a random UUID.
    AuthorizeUrl {
        #[arg(long)]
        state: Option<String>,
    },
    /// Exchange an authorization code for a token
    Exchange {
        #[arg(long)]
        code: String,
    },
    /// Refresh a token
    Refresh {
        #[arg(long)]
        refresh_token: String,
    },
    /// Revoke the access granted to a token
    Revoke {
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        open_id: String,
    },
    /// Fetch the authorizing user's profile
    #[command(name = "userinfo")]
    UserInfo {
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        open_id: String,
    },
}
