//! Export command

use anyhow::Result;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::Orchestrator;

use crate::cli::ExportArgs;
use crate::output;

pub async fn run(args: ExportArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);

    let spinner = output::spinner(&format!("Exporting APIs from {}...", args.platform));
    let reports = orchestrator
        .export(args.platform, args.api.as_deref(), args.only_new)
        .await;
    spinner.finish_and_clear();

    for report in &reports {
        output::report(report);
    }
    output::kv("Staging", orchestrator.stager().root().as_str());

    Ok(())
}
