//! Client configuration for simplydash tools.
//!
//! Where the backend lives and how to reach it: TOML file, then
//! `SIMPLYDASH_*` environment variables, layered over built-in defaults,
//! and translated into a ready [`ApiClient`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use simplydash_api::{ApiClient, TlsMode, TransportConfig};

/// Backend address used when nothing is configured.
pub const DEFAULT_HOST: &str = "http://localhost:8080";

const ENV_PREFIX: &str = "SIMPLYDASH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error(transparent)]
    Api(#[from] simplydash_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// How to reach the dashboard backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://192.168.1.90:8080`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Explicit push channel URL. Derived from `host` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_url: Option<String>,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Accept self-signed certificates on HTTP requests. The push channel
    /// is not covered and always verifies against webpki roots.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM) for HTTP requests. Not used
    /// by the push channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            push_url: None,
            timeout_secs: None,
            insecure: false,
            ca_cert: None,
        }
    }
}

impl ClientConfig {
    /// Check that `host` and `push_url` are usable URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scheme("host", &self.host, &["http", "https"])?;
        if let Some(ref push_url) = self.push_url {
            check_scheme("push_url", push_url, &["ws", "wss"])?;
        }
        Ok(())
    }

    /// Transport settings for the HTTP client.
    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Build an [`ApiClient`] bound to `host`.
    pub fn build_client(&self) -> Result<ApiClient, ConfigError> {
        self.validate()?;
        Ok(ApiClient::with_transport(&self.host, &self.transport())?)
    }

    /// The push channel URL: `push_url` if set, otherwise derived from
    /// the client's host.
    pub fn push_endpoint(&self, client: &ApiClient) -> Result<Url, ConfigError> {
        match self.push_url {
            Some(ref raw) => raw.parse().map_err(|e| ConfigError::Validation {
                field: "push_url".into(),
                reason: format!("{e}: {raw}"),
            }),
            None => Ok(client.push_url()?),
        }
    }

    /// Render as TOML, e.g. for `--show-config` style output.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn check_scheme(field: &str, raw: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    let url: Url = raw.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("{e}: {raw}"),
    })?;

    if !allowed.contains(&url.scheme()) {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!(
                "expected {} URL, got '{}'",
                allowed.join(" or "),
                url.scheme()
            ),
        });
    }
    Ok(())
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "simplydash", "simplydash").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("simplydash");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the canonical config path + environment.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment.
///
/// A missing file is not an error; defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = Figment::new()
        .merge(Serialized::defaults(ClientConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;

    config.validate()?;
    Ok(config)
}
