//! Sync command

use anyhow::Result;
use apimsync_core::types::SyncRequest;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::{sync_response, Orchestrator};

use crate::cli::SyncArgs;
use crate::output;

pub async fn run(args: SyncArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);
    let request = SyncRequest {
        offramp: args.offramp,
        onramp: args.onramp,
        only_new: args.only_new,
    };

    let spinner = output::spinner(&format!(
        "Syncing from {} to {}...",
        request.offramp, request.onramp
    ));
    let reports = orchestrator.run_sync(&request).await;
    spinner.finish_and_clear();

    let response = sync_response(&request, &reports);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    output::header(&format!("Sync {} → {}", request.offramp, request.onramp));
    for report in &reports {
        output::report(report);
    }

    if response.result {
        output::success(&response.message);
    } else {
        output::warning(&format!(
            "Sync from {} to {} finished with problems",
            request.offramp, request.onramp
        ));
    }

    Ok(())
}
