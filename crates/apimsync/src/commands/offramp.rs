//! Offramp command

use anyhow::Result;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::Orchestrator;

use crate::cli::OfframpArgs;
use crate::output;

pub fn run(args: OfframpArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);
    let report = orchestrator.offramp(args.platform, args.group.as_deref());
    output::report(&report);
    Ok(())
}
