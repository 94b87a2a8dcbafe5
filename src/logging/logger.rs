// file: src/logging/logger.rs
// version: 2.0.0
// guid: 1f1aa13f-de17-43ab-b563-5483759c61bd

//! Logger initialization and configuration

use crate::Result;
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// `RUST_LOG` overrides the level chosen from the flags.
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| {
            crate::error::DeployError::ConfigError(format!("Failed to initialize logger: {}", e))
        })?;

    Ok(())
}

/// Create a scoped logger for operations
pub fn with_operation_span<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("operation", name = operation);
    let _enter = span.enter();
    f()
}

/// Create an async scoped logger for operations
pub async fn with_async_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    async move { f().await }.instrument(span).await
}
