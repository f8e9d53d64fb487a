//! Tracing bootstrap for the command-line front end.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::error::{ModelError, Result};

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Calling this again after a
/// subscriber is installed is a no-op; any other failure is returned.
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let init_result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    if let Err(err) = init_result {
        let msg = err.to_string();
        if already_installed(&msg) {
            return Ok(());
        }
        return Err(ModelError::Logging(msg));
    }

    Ok(())
}

// The `log` bridge is installed before the dispatcher, so a repeat init can
// fail on either one.
fn already_installed(msg: &str) -> bool {
    msg.contains("global default trace dispatcher has already been set")
        || msg.contains("logging system was already initialized")
}

fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::WARN,
    }
}
