//! Clean command

use anyhow::Result;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::Orchestrator;

use crate::cli::CleanArgs;
use crate::output;

pub fn run(args: CleanArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);

    if orchestrator.clean(args.platform)? {
        output::success(&format!("Removed staged {} exports", args.platform));
    } else {
        output::info(&format!("No staged {} exports to remove", args.platform));
    }

    Ok(())
}
