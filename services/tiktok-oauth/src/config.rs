//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! The client secret is loaded from TIKTOK_CLIENT_SECRET or
//! client_secret_file, never stored in the TOML directly.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var holding the client secret
pub const SECRET_ENV: &str = "TIKTOK_CLIENT_SECRET";

/// Env var holding the config file path
pub const CONFIG_PATH_ENV: &str = "TIKTOK_OAUTH_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "tiktok-oauth.toml";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub client: ClientConfig,
}

/// TikTok app registration
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub client_key: String,
    #[serde(skip)]
    pub client_secret: Option<Secret<String>>,
    /// Path to a file containing the client secret (alternative to TIKTOK_CLIENT_SECRET)
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,
    pub redirect_url: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    tiktok_auth::DEFAULT_TIMEOUT.as_secs()
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// Client secret resolution order:
    /// 1. TIKTOK_CLIENT_SECRET env var
    /// 2. client_secret_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if config.client.client_key.is_empty() {
            return Err(common::Error::Config("client_key cannot be empty".into()));
        }

        if !config.client.redirect_url.starts_with("http://")
            && !config.client.redirect_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "redirect_url must start with http:// or https://, got: {}",
                config.client.redirect_url
            )));
        }

        if config.client.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if let Ok(secret) = std::env::var(SECRET_ENV) {
            if !secret.is_empty() {
                config.client.client_secret = Some(Secret::new(secret));
            }
        }
        if config.client.client_secret.is_none() {
            if let Some(ref secret_file) = config.client.client_secret_file {
                let secret = std::fs::read_to_string(secret_file).map_err(|source| {
                    common::Error::SecretFile {
                        path: secret_file.clone(),
                        source,
                    }
                })?;
                let secret = secret.trim().to_owned();
                if !secret.is_empty() {
                    config.client.client_secret = Some(Secret::new(secret));
                }
            }
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or TIKTOK_OAUTH_CONFIG env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.client.timeout_secs)
    }

    /// Build the library config. Needs the client secret.
    pub fn oauth_config(&self) -> common::Result<tiktok_auth::Config> {
        let secret = self.client.client_secret.as_ref().ok_or_else(|| {
            common::Error::Config(format!(
                "client secret not configured (set {SECRET_ENV} or client_secret_file)"
            ))
        })?;

        tiktok_auth::build_config(
            &self.client.client_key,
            secret.expose(),
            &self.client.redirect_url,
            self.client.scopes.iter().cloned(),
        )
        .map_err(|e| common::Error::Config(e.to_string()))
    }
}
