use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hwbot_core::{config::Config, notifier::Notifier, poller::Poller};
use hwbot_practicum::PracticumClient;
use hwbot_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = hwbot_core::logging::init("hwbot") {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    // Credentials are checked before anything touches the network.
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("CRITICAL: {e}; the bot cannot start");
            return ExitCode::FAILURE;
        }
    };

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("CRITICAL: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: Config) -> anyhow::Result<()> {
    let source = Arc::new(
        PracticumClient::from_config(&cfg).context("failed to build the Practicum client")?,
    );
    let messenger = Arc::new(TelegramMessenger::from_token(cfg.telegram_token.clone()));
    let notifier = Notifier::new(messenger, cfg.telegram_chat_id);

    let poller = Poller::new(source, notifier, cfg.poll_interval, Utc::now().timestamp());

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received, shutting down");
                signal_token.cancel();
            }
            Err(e) => warn!("failed to listen for interrupt, running until killed: {e}"),
        }
    });

    info!(endpoint = %cfg.endpoint, "hwbot started");
    poller.run(shutdown).await;
    Ok(())
}
