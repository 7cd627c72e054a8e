//! Status command

use anyhow::Result;
use apimsync_core::types::PlatformStatus;
use apimsync_core::ApimSyncConfig;
use apimsync_pipeline::Orchestrator;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::StatusArgs;
use crate::output;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Connected")]
    connected: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl StatusRow {
    fn new(platform: &str, status: &PlatformStatus) -> Self {
        Self {
            platform: platform.to_string(),
            connected: if status.connected { "yes" } else { "no" }.to_string(),
            message: status.message.clone(),
        }
    }
}

pub async fn run(args: StatusArgs, config: ApimSyncConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(config);

    let spinner = output::spinner("Checking platform connections...");
    let status = orchestrator.status().await;
    spinner.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    output::header("Platform status");
    let rows = vec![
        StatusRow::new("azure", &status.azure),
        StatusRow::new("apihub", &status.apihub),
    ];
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);

    Ok(())
}
