//! Onramp command

use anyhow::Result;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::Orchestrator;

use crate::cli::OnrampArgs;
use crate::output;

pub fn run(args: OnrampArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);
    let report = orchestrator.onramp(args.platform, args.group.as_deref());
    output::report(&report);
    Ok(())
}
