//! Binary crate for the `skycast` terminal weather viewer.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The terminal event loop
//! - Rendering UI state with ratatui

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing()?;

    app::App::new(&cli).run().await
}

/// The TUI owns stdout, so logs go to a file, and only when `RUST_LOG` asks
/// for them.
fn init_tracing() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let file = std::fs::File::create("skycast.log").context("Failed to create skycast.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
