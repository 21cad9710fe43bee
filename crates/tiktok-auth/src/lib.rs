//! TikTok OAuth client library
//!
//! Builds the app configuration, exchanges authorization codes, refreshes
//! and revokes tokens, and fetches the authorizing user's basic profile.
//! The crate holds no state between calls: tokens are handed to the caller
//! and never cached.
//!
//! Typical flow:
//! 1. `build_config()` with the app's client key, secret and redirect URL
//! 2. Redirect the user to `Config::authorization_url()`
//! 3. `TikTokClient::exchange_code()` with the code from the callback
//! 4. `TikTokClient::fetch_user_info()` / `refresh_token()` / `revoke_access()`

pub mod classify;
pub mod client;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod token;
pub mod user;

pub use classify::classify_error;
pub use client::{ProviderEndpoints, TikTokClient};
pub use config::{Config, Endpoint, build_config};
pub use constants::*;
pub use error::{Error, ErrorKind, Operation, Result};
pub use token::{
    ExtraValue, Token, open_id_from_token, refresh_expires_in_from_token, scope_from_token,
};
pub use user::UserInfo;
