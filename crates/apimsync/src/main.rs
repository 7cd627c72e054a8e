//! apimsync CLI - migrate API metadata between API-management platforms
//!
//! This is the main entry point for the apimsync command-line interface.

mod cli;
mod commands;
mod output;
mod server;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Must happen before any TLS operation
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = commands::load_config(&cli)?;

    match cli.command {
        Commands::Status(args) => commands::status::run(args, config).await,
        Commands::Export(args) => commands::export::run(args, config).await,
        Commands::Offramp(args) => commands::offramp::run(args, config),
        Commands::Onramp(args) => commands::onramp::run(args, config),
        Commands::Import(args) => commands::import::run(args, config).await,
        Commands::Sync(args) => commands::sync::run(args, config).await,
        Commands::Clean(args) => commands::clean::run(args, config),
        Commands::Serve(args) => commands::serve::run(args, config).await,
        Commands::Config(cmd) => commands::config::run(cmd, config),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Stage progress is logged at info
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
