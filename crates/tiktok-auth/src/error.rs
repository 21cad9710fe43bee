//! Error types for TikTok OAuth operations
//!
//! Every error carries the [`Operation`] that produced it, so the rendered
//! message always starts with the operation name (e.g.
//! `exchange_code: Request error [1000]`). Callers can match on
//! [`Error::kind`] for the failure class.

use std::fmt;

/// Names of the public operations, used as the error message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    BuildConfig,
    ExchangeCode,
    RefreshToken,
    RevokeAccess,
    FetchUserInfo,
    OpenIdFromToken,
    ScopeFromToken,
    RefreshExpiresInFromToken,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::BuildConfig => "build_config",
            Operation::ExchangeCode => "exchange_code",
            Operation::RefreshToken => "refresh_token",
            Operation::RevokeAccess => "revoke_access",
            Operation::FetchUserInfo => "fetch_user_info",
            Operation::OpenIdFromToken => "open_id_from_token",
            Operation::ScopeFromToken => "scope_from_token",
            Operation::RefreshExpiresInFromToken => "refresh_expires_in_from_token",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure class, independent of which operation hit it.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Caller passed an empty or absent required input.
    #[error("{0}")]
    InvalidArgument(String),

    /// Request construction or network failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed JSON in a success or error envelope.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// Structured error envelope returned by TikTok.
    #[error("{description} [{code}]")]
    Provider {
        description: String,
        code: i64,
        message: String,
        captcha: String,
        desc_url: String,
    },

    /// Success envelope that lacks a required field.
    #[error("{0}")]
    Protocol(String),

    /// Token extras lack the named key.
    #[error("token missing {0}")]
    MissingField(&'static str),

    /// Token extras hold the key with the wrong value type.
    #[error("expected token {field} to be a {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

/// An [`ErrorKind`] tagged with the operation that produced it.
#[derive(Debug, thiserror::Error)]
#[error("{operation}: {kind}")]
pub struct Error {
    operation: Operation,
    #[source]
    kind: ErrorKind,
}

impl Error {
    pub fn new(operation: Operation, kind: impl Into<ErrorKind>) -> Self {
        Self {
            operation,
            kind: kind.into(),
        }
    }

    pub(crate) fn invalid_argument(operation: Operation, msg: impl Into<String>) -> Self {
        Self::new(operation, ErrorKind::InvalidArgument(msg.into()))
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Re-tag the error with an outer operation, keeping its kind.
    pub(crate) fn within(self, operation: Operation) -> Self {
        Self {
            operation,
            kind: self.kind,
        }
    }

    /// Provider error code, when TikTok returned a structured error.
    pub fn provider_code(&self) -> Option<i64> {
        match &self.kind {
            ErrorKind::Provider { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result alias for TikTok OAuth operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_operation_name() {
        let err = Error::invalid_argument(Operation::ExchangeCode, "code cannot be empty");
        assert_eq!(err.to_string(), "exchange_code: code cannot be empty");
    }

    #[test]
    fn provider_error_formats_description_and_code() {
        let err = Error::new(
            Operation::FetchUserInfo,
            ErrorKind::Provider {
                description: "Request error".into(),
                code: 1000,
                message: String::new(),
                captcha: String::new(),
                desc_url: String::new(),
            },
        );
        assert_eq!(err.to_string(), "fetch_user_info: Request error [1000]");
        assert_eq!(err.provider_code(), Some(1000));
    }

    #[test]
    fn within_keeps_kind_and_swaps_operation() {
        let err = Error::new(Operation::OpenIdFromToken, ErrorKind::MissingField("open_id"))
            .within(Operation::RevokeAccess);
        assert_eq!(err.operation(), Operation::RevokeAccess);
        assert!(matches!(err.kind(), ErrorKind::MissingField("open_id")));
        assert_eq!(err.to_string(), "revoke_access: token missing open_id");
    }

    #[test]
    fn type_mismatch_names_expected_type() {
        let err = Error::new(
            Operation::RefreshExpiresInFromToken,
            ErrorKind::TypeMismatch {
                field: "refresh_expires_in",
                expected: "i64",
            },
        );
        assert_eq!(
            err.to_string(),
            "refresh_expires_in_from_token: expected token refresh_expires_in to be a i64"
        );
        assert_eq!(err.provider_code(), None);
    }
}
