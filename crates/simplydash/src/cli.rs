//! Clap derive structures for the `simplydash` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// simplydash -- query a simplydash dashboard backend
#[derive(Debug, Parser)]
#[command(
    name = "simplydash",
    version,
    about = "Query a simplydash dashboard backend from the command line",
    long_about = "Fetch the dashboard configuration and shortcut categories,\n\
        probe URLs through the backend's healthcheck proxy, and follow\n\
        live update notices over the push channel.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SIMPLYDASH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL (overrides config)
    #[arg(long, short = 'H', env = "SIMPLYDASH_HOST", global = true)]
    pub host: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, tab separated (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard configuration
    #[command(alias = "cfg")]
    Config,

    /// List shortcut categories and their items
    #[command(alias = "cat")]
    Categories,

    /// Probe a URL through the backend healthcheck proxy
    Health(HealthArgs),

    /// Check that the backend itself is up
    ServerHealth,

    /// Follow push notices and print fresh data on each one
    Watch,

    /// Print the built-in default configuration document
    DefaultConfig,
}

#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Target URL to probe
    pub url: String,
}
