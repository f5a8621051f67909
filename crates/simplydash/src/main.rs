mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use simplydash_config::ClientConfig;

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = build_client_config(&cli.global)?;
    tracing::debug!(command = ?cli.command, host = %cfg.host, "dispatching command");
    commands::dispatch(cli.command, &cfg, cli.global.output).await
}

/// Config file + environment, then `--host` on top.
fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let mut cfg = match global.config {
        Some(ref path) => simplydash_config::load_config_from(path)?,
        None => simplydash_config::load_config()?,
    };

    if let Some(ref host) = global.host {
        cfg.host.clone_from(host);
        cfg.validate()?;
    }

    Ok(cfg)
}
