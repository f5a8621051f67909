//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use simplydash_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(simplydash::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Set it with --host or SIMPLYDASH_HOST."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: simplydash_api::Error,
    },

    #[error("Push channel at {url} closed")]
    #[diagnostic(
        code(simplydash::push_closed),
        help("The backend dropped the connection. Run `simplydash watch` again to resubscribe.")
    )]
    PushClosed { url: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("Unexpected response from {url}")]
    #[diagnostic(
        code(simplydash::invalid_response),
        help("The backend answered, but not with the expected document. Is --host pointing at simplydash?")
    )]
    InvalidResponse {
        url: String,
        #[source]
        source: simplydash_api::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(simplydash::config))]
    Config(#[from] ConfigError),

    // ── Serialization ────────────────────────────────────────────────
    #[error("Failed to render output: {0}")]
    #[diagnostic(code(simplydash::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Attribute an API failure to the backend it came from.
    pub fn from_api(err: simplydash_api::Error, url: &url::Url) -> Self {
        let url = url.to_string();
        if err.is_decode() {
            Self::InvalidResponse { url, source: err }
        } else {
            Self::ConnectionFailed { url, source: err }
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::PushClosed { .. } => exit_code::CONNECTION,
            Self::Config(_) => exit_code::USAGE,
            Self::InvalidResponse { .. } | Self::Json(_) => exit_code::GENERAL,
        }
    }
}
