//! Output formatting: JSON or plain tab-separated text.

use std::io::{self, Write};

use serde::Serialize;

use simplydash_api::model::{AppHealth, Category, Config};

use crate::cli::OutputFormat;

/// Render any serializable value, with `plain` supplied by the caller.
pub fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
    plain: impl FnOnce(&T) -> String,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(data),
        OutputFormat::JsonCompact => serde_json::to_string(data),
        OutputFormat::Plain => Ok(plain(data)),
    }
}

pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Plain renderers ──────────────────────────────────────────────────

pub fn config_plain(config: &Config) -> String {
    let settings = &config.settings;
    let indicators = if settings.enable_health_indicators { "on" } else { "off" };
    format!(
        "name\t{}\nhealth_indicators\t{indicators}\naccent_light\t{}\naccent_dark\t{}",
        settings.name, settings.theme.light.accent_color, settings.theme.dark.accent_color,
    )
}

/// One line per item: `category<TAB>item<TAB>url`.
pub fn categories_plain(categories: &[Category]) -> String {
    categories
        .iter()
        .flat_map(|category| {
            category
                .items
                .iter()
                .map(move |item| format!("{}\t{}\t{}", category.name, item.name, item.url))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of a healthcheck, as printed by `health`.
#[derive(Debug, Serialize)]
pub struct HealthReport<'a> {
    pub url: &'a str,
    pub status: u16,
    pub health: AppHealth,
}

impl<'a> HealthReport<'a> {
    pub fn new(url: &'a str, status: u16) -> Self {
        Self {
            url,
            status,
            health: AppHealth::from_status(status),
        }
    }

    pub fn plain(&self) -> String {
        format!("{}\t{}\t{}", self.status, self.health, self.url)
    }
}
