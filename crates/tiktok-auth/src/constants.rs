//! TikTok OAuth constants
//!
//! Provider endpoints are fixed by TikTok's v1 open API. Only the token
//! endpoint travels with the [`Config`](crate::Config); refresh, revoke and
//! user info are always called at the URLs below.

use std::time::Duration;

/// Authorization page the user is redirected to
pub const AUTH_ENDPOINT: &str = "https://open-api.tiktok.com/platform/oauth/connect/";

/// Authorization code exchange
pub const TOKEN_ENDPOINT: &str = "https://open-api.tiktok.com/oauth/access_token/";

/// Refresh token grant
pub const REFRESH_ENDPOINT: &str = "https://open-api.tiktok.com/oauth/refresh_token/";

/// Access revocation
pub const REVOKE_ENDPOINT: &str = "https://open-api.tiktok.com/oauth/revoke/";

/// Basic profile of the authorizing user
pub const USER_INFO_ENDPOINT: &str = "https://open-api.tiktok.com/oauth/userinfo/";

/// Scope requested when the caller asks for none
pub const DEFAULT_SCOPE: &str = "user.info.basic";

/// Token type stamped on every token this crate issues
pub const TOKEN_TYPE: &str = "Bearer";

/// Client-level ceiling for every provider call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Extra-field keys carried on [`Token`](crate::Token)
pub const EXTRA_OPEN_ID: &str = "open_id";
pub const EXTRA_SCOPE: &str = "scope";
pub const EXTRA_REFRESH_EXPIRES_IN: &str = "refresh_expires_in";
