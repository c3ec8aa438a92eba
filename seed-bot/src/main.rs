//! seed-bot binary: loads `.env`, initializes logging, runs one CLI command.

use anyhow::Result;
use clap::Parser;
use seed_bot::cli::{self, Cli};
use seed_bot::{build_components, init_tracing, SeedConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = SeedConfig::load()?;
    config.validate()?;
    init_tracing(config.log_file())?;
    info!(log_file = %config.log_file(), "seed-bot starting");

    let components = build_components(&config)?;
    cli::run(cli.command, &components).await
}
