// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! gnip CLI
//!
//! Command-line client for the Twitter enterprise data APIs

use clap::Parser;
use gnip_cli::cli::{Cli, Runner};
use gnip_cli::config::Settings;
use gnip_cli::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Results go to stdout; logs stay on stderr
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.env_file.as_deref())?;
    Runner::new(cli, settings)?.run().await
}
