use crate::{errors::Error, Result};

/// Initialize logging/tracing for the bot.
///
/// Lines go to stdout with timestamp, level and the module the event came from.
pub fn init(service_name: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    // Default: debug for our crates, info for everything else.
    // Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,hwbot_core=debug,hwbot_practicum=debug,hwbot_telegram=debug,{service_name}=debug"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Unexpected(format!("failed to install log subscriber: {e}")))
}
