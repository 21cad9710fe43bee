//! OAuth token and typed access to its provider extras
//!
//! TikTok returns `open_id`, `scope` and `refresh_expires_in` alongside the
//! standard token fields. They ride on [`Token`] as a small string-keyed map
//! of [`ExtraValue`]s and are read back with the `*_from_token` accessors.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use crate::constants::{EXTRA_OPEN_ID, EXTRA_REFRESH_EXPIRES_IN, EXTRA_SCOPE, TOKEN_TYPE};
use crate::envelope::TokenData;
use crate::error::{Error, ErrorKind, Operation, Result};

/// Value stored under a token extra key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraValue {
    String(String),
    Int(i64),
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::String(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::String(value.to_owned())
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        ExtraValue::Int(value)
    }
}

/// Access/refresh token pair as issued by TikTok.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: String,
    /// Absolute expiry of the access token
    pub expiry: SystemTime,
    extra: BTreeMap<String, ExtraValue>,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        refresh_token: impl Into<String>,
        expiry: SystemTime,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            refresh_token: refresh_token.into(),
            expiry,
            extra: BTreeMap::new(),
        }
    }

    /// Build a bearer token from a decoded envelope, expiring `expires_in`
    /// seconds after `now`.
    ///
    /// Returns `None` when the expiry is not representable as a `SystemTime`.
    pub(crate) fn from_envelope(data: TokenData, now: SystemTime) -> Option<Self> {
        let expires_in = Duration::from_secs(data.expires_in.max(0) as u64);
        let expiry = now.checked_add(expires_in)?;
        let token = Token::new(data.access_token, TOKEN_TYPE, data.refresh_token, expiry)
            .with_extra(EXTRA_OPEN_ID, data.open_id)
            .with_extra(EXTRA_SCOPE, data.scope)
            .with_extra(EXTRA_REFRESH_EXPIRES_IN, data.refresh_expires_in);
        Some(token)
    }

    /// Return the token with `key` set to `value`.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&ExtraValue> {
        self.extra.get(key)
    }

    /// Non-empty access token that has not yet expired.
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && self.expiry > SystemTime::now()
    }

    /// Value for an HTTP `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    pub fn open_id(&self) -> Result<&str> {
        open_id_from_token(Some(self))
    }

    pub fn scope(&self) -> Result<&str> {
        scope_from_token(Some(self))
    }

    pub fn refresh_expires_in(&self) -> Result<i64> {
        refresh_expires_in_from_token(Some(self))
    }
}

fn lookup<'a>(
    op: Operation,
    token: Option<&'a Token>,
    key: &'static str,
) -> Result<&'a ExtraValue> {
    let token = token.ok_or_else(|| Error::invalid_argument(op, "token cannot be nil"))?;
    token
        .extra(key)
        .ok_or_else(|| Error::new(op, ErrorKind::MissingField(key)))
}

fn string_extra<'a>(
    op: Operation,
    token: Option<&'a Token>,
    key: &'static str,
) -> Result<&'a str> {
    match lookup(op, token, key)? {
        ExtraValue::String(s) => Ok(s.as_str()),
        ExtraValue::Int(_) => Err(Error::new(
            op,
            ErrorKind::TypeMismatch {
                field: key,
                expected: "string",
            },
        )),
    }
}

/// TikTok user id the token was issued for.
pub fn open_id_from_token(token: Option<&Token>) -> Result<&str> {
    string_extra(Operation::OpenIdFromToken, token, EXTRA_OPEN_ID)
}

/// Comma-separated scopes the user granted.
pub fn scope_from_token(token: Option<&Token>) -> Result<&str> {
    string_extra(Operation::ScopeFromToken, token, EXTRA_SCOPE)
}

/// Lifetime of the refresh token in seconds, as reported at issue time.
pub fn refresh_expires_in_from_token(token: Option<&Token>) -> Result<i64> {
    let op = Operation::RefreshExpiresInFromToken;
    match lookup(op, token, EXTRA_REFRESH_EXPIRES_IN)? {
        ExtraValue::Int(n) => Ok(*n),
        ExtraValue::String(_) => Err(Error::new(
            op,
            ErrorKind::TypeMismatch {
                field: EXTRA_REFRESH_EXPIRES_IN,
                expected: "i64",
            },
        )),
    }
}
