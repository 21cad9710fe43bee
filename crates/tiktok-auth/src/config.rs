//! Client configuration
//!
//! A [`Config`] is built once with [`build_config`] and never mutated.
//! It carries the app credentials, the redirect URL, the requested scopes
//! and the authorization/token endpoint pair.

use common::Secret;
use reqwest::Url;

use crate::constants::{AUTH_ENDPOINT, DEFAULT_SCOPE, TOKEN_ENDPOINT};
use crate::error::{Error, Operation, Result};

/// Authorization and token endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub auth_url: String,
    pub token_url: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            auth_url: AUTH_ENDPOINT.to_owned(),
            token_url: TOKEN_ENDPOINT.to_owned(),
        }
    }
}

/// Immutable OAuth client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    client_id: String,
    client_secret: Secret<String>,
    redirect_url: String,
    scopes: Vec<String>,
    endpoint: Endpoint,
}

/// Validate credentials and build a [`Config`].
///
/// Arguments are checked in order (client id, client secret, redirect url)
/// and the first empty one is reported. An empty `scopes` list becomes
/// `["user.info.basic"]`.
pub fn build_config<S>(
    client_id: &str,
    client_secret: &str,
    redirect_url: &str,
    scopes: impl IntoIterator<Item = S>,
) -> Result<Config>
where
    S: Into<String>,
{
    let op = Operation::BuildConfig;
    if client_id.is_empty() {
        return Err(Error::invalid_argument(op, "client id cannot be empty"));
    }
    if client_secret.is_empty() {
        return Err(Error::invalid_argument(op, "client secret cannot be empty"));
    }
    if redirect_url.is_empty() {
        return Err(Error::invalid_argument(op, "redirect url cannot be empty"));
    }

    let mut scopes: Vec<String> = scopes.into_iter().map(Into::into).collect();
    if scopes.is_empty() {
        scopes.push(DEFAULT_SCOPE.to_owned());
    }

    Ok(Config {
        client_id: client_id.to_owned(),
        client_secret: Secret::from(client_secret),
        redirect_url: redirect_url.to_owned(),
        scopes,
        endpoint: Endpoint::default(),
    })
}

impl Config {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &Secret<String> {
        &self.client_secret
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Copy of this config pointing at a different endpoint pair.
    pub fn with_endpoint(&self, endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..self.clone()
        }
    }

    /// URL the user is sent to in order to grant access.
    ///
    /// TikTok identifies the app with `client_key` and expects scopes
    /// comma-separated. `state` is returned unchanged on the callback.
    pub fn authorization_url(&self, state: &str) -> Result<String> {
        let mut url = Url::parse(&self.endpoint.auth_url).map_err(|e| {
            Error::invalid_argument(
                Operation::BuildConfig,
                format!("invalid authorization url {}: {e}", self.endpoint.auth_url),
            )
        })?;
        url.query_pairs_mut()
            .append_pair("client_key", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes.join(","))
            .append_pair("redirect_uri", &self.redirect_url)
            .append_pair("state", state);
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn build_config_keeps_inputs() {
        let cfg = build_config(
            "test-client-id",
            "test-client-secret",
            "https://example.com/cb",
            ["test-scope-1", "test-scope-2"],
        )
        .unwrap();

        assert_eq!(cfg.client_id(), "test-client-id");
        assert_eq!(cfg.client_secret().expose(), "test-client-secret");
        assert_eq!(cfg.redirect_url(), "https://example.com/cb");
        assert_eq!(cfg.scopes(), ["test-scope-1", "test-scope-2"]);
        assert_eq!(cfg.endpoint(), &Endpoint::default());
    }

    #[test]
    fn build_config_defaults_scope() {
        let cfg = build_config("id", "secret", "https://example.com/cb", Vec::<String>::new())
            .unwrap();
        assert_eq!(cfg.scopes(), ["user.info.basic"]);
    }

    #[test]
    fn build_config_rejects_empty_arguments_in_order() {
        let cases = [
            ("", "", "", "build_config: client id cannot be empty"),
            ("id", "", "", "build_config: client secret cannot be empty"),
            ("id", "secret", "", "build_config: redirect url cannot be empty"),
        ];

        for (id, secret, url, expected) in cases {
            let err = build_config(id, secret, url, ["s"]).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::InvalidArgument(_)),
                "expected InvalidArgument, got {err:?}"
            );
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn debug_output_redacts_secret() {
        let cfg = build_config("id", "super-secret", "https://example.com/cb", ["s"]).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret"), "got: {debug}");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn with_endpoint_leaves_original_untouched() {
        let cfg = build_config("id", "secret", "https://example.com/cb", ["s"]).unwrap();
        let moved = cfg.with_endpoint(Endpoint {
            auth_url: "http://127.0.0.1:1/auth".into(),
            token_url: "http://127.0.0.1:1/token".into(),
        });
        assert_eq!(moved.endpoint().token_url, "http://127.0.0.1:1/token");
        assert_eq!(cfg.endpoint().token_url, TOKEN_ENDPOINT);
        assert_eq!(moved.client_id(), "id");
    }

    #[test]
    fn authorization_url_contains_required_params() {
        let cfg = build_config(
            "test-client-key",
            "secret",
            "https://example.com/callback",
            ["user.info.basic", "video.list"],
        )
        .unwrap();
        let url = cfg.authorization_url("state-123").unwrap();

        assert!(url.starts_with(AUTH_ENDPOINT));
        assert!(url.contains("client_key=test-client-key"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=user.info.basic%2Cvideo.list"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcallback"));
        assert!(url.contains("state=state-123"));
    }

    #[test]
    fn authorization_url_rejects_unparseable_endpoint() {
        let cfg = build_config("id", "secret", "https://example.com/cb", ["s"])
            .unwrap()
            .with_endpoint(Endpoint {
                auth_url: "not a url".into(),
                token_url: TOKEN_ENDPOINT.into(),
            });
        assert!(cfg.authorization_url("s").is_err());
    }
}
