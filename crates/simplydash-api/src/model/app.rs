// Legacy shortcut model.
//
// Older backends grouped shortcuts as apps with an embedded per-app
// healthcheck instead of categories/items. Every field has a default,
// so partially populated app documents still decode.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::config::DEFAULT_NAME;

/// Health classification of a probed URL.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AppHealth {
    Healthy,
    Timeout,
    Warning,
    Error,
    #[default]
    Unknown,
}

impl AppHealth {
    /// Classify an HTTP status returned by the healthcheck proxy.
    ///
    /// Anything below 400 is healthy. `404` and server errors mean the
    /// target is down; the remaining 4xx answers are warnings.
    pub fn from_status(status: u16) -> Self {
        match status {
            0..=399 => Self::Healthy,
            404 | 500.. => Self::Error,
            _ => Self::Warning,
        }
    }

    pub fn is_healthy(self) -> bool {
        self == Self::Healthy
    }
}

/// Per-app healthcheck settings and last known state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppHealthcheck {
    pub enabled: bool,
    pub health: AppHealth,
    /// Poll interval in seconds.
    pub interval: u64,
    /// Probe timeout in seconds.
    pub timeout: u64,
}

/// A single legacy shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct App {
    pub name: String,
    pub link: String,
    pub group: String,
    pub description: String,
    pub icon: String,
    pub healthcheck: AppHealthcheck,
}

/// Named group of legacy apps, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppGroup {
    pub name: String,
    pub apps: Vec<App>,
}

/// Legacy settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.into(),
        }
    }
}
