//! Import command

use anyhow::Result;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::Orchestrator;

use crate::cli::ImportArgs;
use crate::output;

pub async fn run(args: ImportArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);

    let spinner = output::spinner(&format!("Importing APIs into {}...", args.platform));
    let report = orchestrator.import(args.platform).await;
    spinner.finish_and_clear();

    output::report(&report);
    Ok(())
}
