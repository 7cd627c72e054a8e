//! CLI command implementations

pub mod clean;
pub mod config;
pub mod export;
pub mod import;
pub mod offramp;
pub mod onramp;
pub mod serve;
pub mod status;
pub mod sync;

use anyhow::Result;
use apimsync_core::ApimSyncConfig;

use crate::cli::Cli;

/// Load the config file and apply flag and environment overrides
pub fn load_config(cli: &Cli) -> Result<ApimSyncConfig> {
    let config = ApimSyncConfig::load(cli.config.as_deref())?;
    Ok(config.with_overrides(cli.overrides()))
}
