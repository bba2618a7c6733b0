use clap::Parser;

use skycast_core::source::http;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather viewer")]
pub struct Cli {
    /// City to fetch on startup. Skips automatic location detection.
    #[arg(long)]
    pub city: Option<String>,

    /// Base URL of the weather endpoint.
    #[arg(long, default_value = http::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Start with temperatures in Fahrenheit.
    #[arg(long)]
    pub fahrenheit: bool,

    /// Start with the dark theme.
    #[arg(long)]
    pub dark: bool,

    /// Do not auto-detect location on startup.
    #[arg(long)]
    pub no_locate: bool,
}
