// Configuration document served by `/api/config`.
//
// Field names match the backend's JSON exactly. Nothing is defaulted on
// decode: a document missing any settings or theme field is rejected.
// `Default` is the only path that fills values in.

use serde::{Deserialize, Serialize};

/// Display name used when the backend has no settings stored yet.
pub const DEFAULT_NAME: &str = "simplydash";

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub settings: Settings,
}

impl Config {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// User-facing preferences nested inside [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Dashboard display name.
    pub name: String,
    /// Whether the UI should probe item URLs through the healthcheck proxy.
    pub enable_health_indicators: bool,
    pub theme: Theme,
}

impl Settings {
    pub fn new(name: impl Into<String>, enable_health_indicators: bool, theme: Theme) -> Self {
        Self {
            name: name.into(),
            enable_health_indicators,
            theme,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, false, Theme::default())
    }
}

/// Paired light/dark palettes. The UI picks one by display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub light: ThemeColors,
    pub dark: ThemeColors,
}

impl Theme {
    pub fn new(light: ThemeColors, dark: ThemeColors) -> Self {
        Self { light, dark }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeColors::default_light(), ThemeColors::default_dark())
    }
}

/// Eight opaque color expressions (usually CSS). Not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub element_background: String,
    pub foreground: String,
    pub foreground_secondary: String,
    pub accent_color: String,
    pub success_color: String,
    pub warning_color: String,
    pub error_color: String,
}

impl ThemeColors {
    /// Built-in light palette.
    pub fn default_light() -> Self {
        Self {
            background: "rgb(235, 235, 235)".into(),
            element_background: "rgb(250, 250, 250)".into(),
            foreground: "rgba(0, 0, 0, 0.8)".into(),
            foreground_secondary: "rgba(0, 0, 0, 0.5)".into(),
            accent_color: "rgb(28, 113, 216)".into(),
            success_color: "rgb(46, 194, 126)".into(),
            warning_color: "rgb(229, 165, 10)".into(),
            error_color: "rgb(224, 27, 36)".into(),
        }
    }

    /// Built-in dark palette.
    pub fn default_dark() -> Self {
        Self {
            background: "rgb(36, 36, 36)".into(),
            element_background: "rgb(48, 48, 48)".into(),
            foreground: "rgba(255, 255, 255, 0.8)".into(),
            foreground_secondary: "rgba(255, 255, 255, 0.5)".into(),
            accent_color: "rgb(120, 174, 237)".into(),
            success_color: "rgb(38, 162, 105)".into(),
            warning_color: "rgb(205, 147, 9)".into(),
            error_color: "rgb(192, 28, 40)".into(),
        }
    }
}
