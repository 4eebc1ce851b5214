// my-zt - Terminal dashboard for ZeroTier networks
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use my_zt::config::ConfigStore;
use my_zt::tui;
use my_zt::zerotier::ZeroTier;

/// Terminal dashboard for ZeroTier networks and their members.
#[derive(Parser)]
#[command(name = "my-zt", version, about)]
struct Cli {
    /// Path to the config file (default: ~/.my-zt.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing filter for the log file (e.g. "debug" or "my_zt=trace")
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_filter)?;

    let store = match cli.config {
        Some(path) => ConfigStore::at_path(path),
        None => ConfigStore::new().context("Failed to locate config file")?,
    };
    let zt = ZeroTier::new(store)?;

    tui::run(zt).await
}

// The TUI owns the terminal, so logs go to ~/.my-zt.log instead of stderr.
fn init_logging(filter: &str) -> Result<()> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(home.join(".my-zt.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
