//! Serve command

use anyhow::Result;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::Orchestrator;

use crate::cli::ServeArgs;
use crate::server;

pub async fn run(args: ServeArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);
    server::serve(orchestrator, &args.host, args.port).await
}
