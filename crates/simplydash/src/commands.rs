//! Command handlers: call the backend, render the result.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use simplydash_api::model::Config;
use simplydash_api::{ApiClient, PushMessage, Subscription, TlsMode};
use simplydash_config::ClientConfig;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;
use crate::output::{self, HealthReport};

pub async fn dispatch(
    cmd: Command,
    cfg: &ClientConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    if let Command::DefaultConfig = cmd {
        return print_config(&Config::default(), format);
    }

    let client = cfg.build_client()?;
    debug!(host = %client.host(), "client ready");

    match cmd {
        Command::Config => {
            let config = client
                .get_config()
                .await
                .map_err(|e| CliError::from_api(e, client.host()))?;
            print_config(&config, format)
        }
        Command::Categories => print_categories(&client, format).await,
        Command::Health(args) => {
            let status = client
                .healthcheck(&args.url)
                .await
                .map_err(|e| CliError::from_api(e, client.host()))?;
            let report = HealthReport::new(&args.url, status);
            output::print_output(&output::render(format, &report, HealthReport::plain)?);
            Ok(())
        }
        Command::ServerHealth => {
            let status = client
                .server_health()
                .await
                .map_err(|e| CliError::from_api(e, client.host()))?;
            output::print_output(&status.to_string());
            Ok(())
        }
        Command::Watch => watch(&client, cfg, format).await,
        Command::DefaultConfig => Ok(()),
    }
}

fn print_config(config: &Config, format: OutputFormat) -> Result<(), CliError> {
    output::print_output(&output::render(format, config, output::config_plain)?);
    Ok(())
}

async fn print_categories(client: &ApiClient, format: OutputFormat) -> Result<(), CliError> {
    let categories = client
        .get_categories()
        .await
        .map_err(|e| CliError::from_api(e, client.host()))?;
    output::print_output(&output::render(
        format,
        categories.as_slice(),
        output::categories_plain,
    )?);
    Ok(())
}

/// Print config and categories, then reprint whichever one the backend
/// announces as changed until the channel closes or Ctrl-C.
async fn watch(client: &ApiClient, cfg: &ClientConfig, format: OutputFormat) -> Result<(), CliError> {
    let push_url = cfg.push_endpoint(client)?;
    if push_url.scheme() == "wss" && cfg.transport().tls != TlsMode::System {
        warn!(
            url = %push_url,
            "insecure and ca_cert apply to HTTP requests only; the push channel verifies against webpki roots"
        );
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<PushMessage>();
    let subscription = Subscription::open(push_url.clone(), tx)
        .map_err(|e| CliError::from_api(e, &push_url))?;

    let config = client
        .get_config()
        .await
        .map_err(|e| CliError::from_api(e, client.host()))?;
    print_config(&config, format)?;
    print_categories(client, format).await?;

    loop {
        tokio::select! {
            // Notices queued before the socket dropped are handled first.
            biased;
            Some(message) = rx.recv() => {
                info!(%message, "update notice");
                match message {
                    PushMessage::UpdateConfig => {
                        let config = client
                            .get_config()
                            .await
                            .map_err(|e| CliError::from_api(e, client.host()))?;
                        print_config(&config, format)?;
                    }
                    PushMessage::UpdateCategories => print_categories(client, format).await?,
                }
            }
            () = subscription.closed() => {
                return Err(CliError::PushClosed { url: push_url.to_string() });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, closing push channel");
                subscription.unsubscribe();
                return Ok(());
            }
        }
    }
}
