use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// The terminal belongs to the UI, so logs go to a file in the user data
/// directory.
pub(crate) fn init(config: &Config) -> Result<PathBuf> {
    let path = log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid log filter: '{}'", config.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Could not install logger: {e}"))?;

    tracing::info!(api_url = %config.api_url, "txnview {} starting", env!("CARGO_PKG_VERSION"));
    Ok(path)
}

fn log_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "txnview", "TxnView")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("txnview.log"))
}
