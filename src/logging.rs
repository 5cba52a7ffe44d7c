use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const DEFAULT_DIRECTIVE: &str = "athlete_terminal=info";

/// Installs the global subscriber. The terminal UI owns stdout, so events go
/// to `log_path` (or nowhere when no path is available).
pub fn init(log_path: Option<&Path>) -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let registry = tracing_subscriber::registry().with(filter);

    match log_path {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).ok();
            }
            let file = File::create(path)
                .map_err(|err| anyhow!("create log file {}: {err}", path.display()))?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file));
            registry
                .with(layer)
                .try_init()
                .map_err(|err| anyhow!("install tracing subscriber: {err}"))?;
        }
        None => {
            let layer = fmt::layer().with_writer(std::io::sink);
            registry
                .with(layer)
                .try_init()
                .map_err(|err| anyhow!("install tracing subscriber: {err}"))?;
        }
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "athlete terminal starting");
    Ok(())
}
