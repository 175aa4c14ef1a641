//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` and defaults to `info`, e.g.
//!
//! ```bash
//! RUST_LOG=dice_core=debug dice --headless
//! ```
//!
//! Headless mode logs to stderr so stdout stays a clean result stream.
//! The TUI owns the terminal, so it only logs when given a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber for the chosen front-end.
pub fn init_tracing(headless: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    match (log_file, headless) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()?;
        }
        (None, true) => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
        (None, false) => {}
    }
    Ok(())
}
