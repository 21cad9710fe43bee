//! TikTok OAuth operations
//!
//! Four request/response cycles against the provider:
//! 1. Authorization code exchange (`exchange_code`)
//! 2. Token refresh (`refresh_token`)
//! 3. Access revocation (`revoke_access`)
//! 4. User profile lookup (`fetch_user_info`)
//!
//! Each makes exactly one HTTP call with its parameters in the query
//! string. There are no retries. Dropping the returned future aborts the
//! in-flight request; the client timeout is the outer ceiling.

use std::time::{Duration, SystemTime};

use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, info};

use crate::classify::{classify_error, decode_or_classify};
use crate::config::Config;
use crate::constants::{DEFAULT_TIMEOUT, REFRESH_ENDPOINT, REVOKE_ENDPOINT, USER_INFO_ENDPOINT};
use crate::envelope::{TokenEnvelope, UserInfoEnvelope};
use crate::error::{Error, ErrorKind, Operation, Result};
use crate::token::{Token, open_id_from_token};
use crate::user::UserInfo;

/// Fixed endpoints that do not travel with a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub refresh_url: String,
    pub revoke_url: String,
    pub user_info_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            refresh_url: REFRESH_ENDPOINT.to_owned(),
            revoke_url: REVOKE_ENDPOINT.to_owned(),
            user_info_url: USER_INFO_ENDPOINT.to_owned(),
        }
    }
}

/// Stateless TikTok OAuth client.
///
/// Holds one shared `reqwest::Client` (connection pooling is reqwest's job)
/// and never caches tokens. Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct TikTokClient {
    http: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl TikTokClient {
    /// Client with the default 10 second timeout.
    pub fn new() -> std::result::Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http))
    }

    /// Wrap an existing HTTP client (its timeout policy is kept as-is).
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            http,
            endpoints: ProviderEndpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Exchange an authorization code for a token.
    ///
    /// POSTs to the config's token endpoint with `client_key`,
    /// `client_secret`, `code` and `grant_type=authorization_code`.
    pub async fn exchange_code(&self, config: &Config, code: &str) -> Result<Token> {
        let op = Operation::ExchangeCode;
        if code.is_empty() {
            return Err(Error::invalid_argument(op, "code cannot be empty"));
        }

        let url = &config.endpoint().token_url;
        let request = self.http.post(url).query(&[
            ("client_key", config.client_id()),
            ("client_secret", config.client_secret().expose().as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
        ]);

        let (status, body) = send(op, url, request).await?;
        let token = token_from_response(op, status, &body)?;
        info!(open_id = token.open_id().unwrap_or_default(), "authorization code exchanged");
        Ok(token)
    }

    /// Obtain a fresh token pair from a refresh token.
    pub async fn refresh_token(&self, client_key: &str, refresh_token: &str) -> Result<Token> {
        let op = Operation::RefreshToken;
        if client_key.is_empty() {
            return Err(Error::invalid_argument(op, "client key cannot be empty"));
        }
        if refresh_token.is_empty() {
            return Err(Error::invalid_argument(op, "refresh token cannot be empty"));
        }

        let url = &self.endpoints.refresh_url;
        let request = self.http.post(url).query(&[
            ("client_key", client_key),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ]);

        let (status, body) = send(op, url, request).await?;
        let token = token_from_response(op, status, &body)?;
        info!(open_id = token.open_id().unwrap_or_default(), "token refreshed");
        Ok(token)
    }

    /// Revoke the access granted to `token`.
    ///
    /// TikTok answers a successful revoke with an empty body; any content
    /// is read as an error envelope.
    pub async fn revoke_access(&self, token: &Token) -> Result<()> {
        let op = Operation::RevokeAccess;
        let open_id = open_id_from_token(Some(token)).map_err(|e| e.within(op))?;

        let url = &self.endpoints.revoke_url;
        let request = self.http.post(url).query(&[
            ("access_token", token.access_token.as_str()),
            ("open_id", open_id),
        ]);

        let (status, body) = send(op, url, request).await?;
        if status.is_success() && body.trim_ascii().is_empty() {
            info!(open_id, "access revoked");
            return Ok(());
        }

        Err(Error::new(op, classify_error(&body)))
    }

    /// Fetch the profile of the user `token` was issued for.
    pub async fn fetch_user_info(&self, token: &Token) -> Result<UserInfo> {
        let op = Operation::FetchUserInfo;
        let open_id = open_id_from_token(Some(token)).map_err(|e| e.within(op))?;

        let url = &self.endpoints.user_info_url;
        let request = self.http.get(url).query(&[
            ("access_token", token.access_token.as_str()),
            ("open_id", open_id),
        ]);

        let (status, body) = send(op, url, request).await?;
        let envelope: UserInfoEnvelope =
            decode_or_classify(status, &body).map_err(|kind| Error::new(op, kind))?;

        debug!(open_id, "user info fetched");
        Ok(envelope.data.into())
    }
}

/// Send the request and read the whole body.
async fn send(
    op: Operation,
    url: &str,
    request: RequestBuilder,
) -> Result<(StatusCode, Vec<u8>)> {
    debug!(operation = %op, endpoint = url, "sending provider request");

    let response = request.send().await.map_err(|e| Error::new(op, e))?;
    let status = response.status();
    let body = response.bytes().await.map_err(|e| Error::new(op, e))?;

    debug!(operation = %op, %status, bytes = body.len(), "provider responded");
    Ok((status, body.to_vec()))
}

fn token_from_response(op: Operation, status: StatusCode, body: &[u8]) -> Result<Token> {
    let envelope: TokenEnvelope =
        decode_or_classify(status, body).map_err(|kind| Error::new(op, kind))?;

    if envelope.data.access_token.is_empty() {
        return Err(Error::new(
            op,
            ErrorKind::Protocol("server response missing access_token".into()),
        ));
    }

    Token::from_envelope(envelope.data, SystemTime::now()).ok_or_else(|| {
        Error::new(
            op,
            ErrorKind::Protocol("server response has invalid expires_in".into()),
        )
    })
}
