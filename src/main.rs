mod config;
mod controller;
mod dispatch;
mod filter;
mod logging;
mod models;
mod run;
mod source;
mod ui;

use anyhow::Result;
use std::sync::Arc;

fn main() -> Result<()> {
    let mut config = config::Config::from_env()?;
    let args = config.apply_args(&std::env::args().collect::<Vec<_>>())?;

    // A missing log file should not keep the viewer from starting.
    match logging::init(&config) {
        Ok(path) => tracing::debug!("logging to {}", path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {e:#}"),
    }

    let source = source::HttpSource::new(&config)?;

    match args.len() {
        1 => run::as_tui(Arc::new(source)),
        2.. => run::as_cli(&args, &source),
        _ => {
            eprintln!("Usage: txnview [command]");
            Ok(())
        }
    }
}
