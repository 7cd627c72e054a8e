//! Config command

use anyhow::Result;
use apimsync_core::ApimSyncConfig;

use crate::cli::{ConfigCommands, ConfigShowArgs};
use crate::output;

pub fn run(cmd: ConfigCommands, config: ApimSyncConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => show(args, config),
    }
}

fn show(args: ConfigShowArgs, config: ApimSyncConfig) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(config.inner())?);
        return Ok(());
    }

    match &config.config_path {
        Some(path) => output::info(&format!("Configuration: {}", path)),
        None => output::info("No configuration file found, using defaults"),
    }

    let azure = config.azure();
    let credentials = &azure.credentials;
    output::header("Azure API Management");
    output::kv("Subscription", azure.subscription.as_deref().unwrap_or("-"));
    output::kv("Resource group", azure.resource_group.as_deref().unwrap_or("-"));
    output::kv("Service", azure.service_name.as_deref().unwrap_or("-"));
    output::kv(
        "Token",
        if credentials.token.is_some() || credentials.env_token.is_some() {
            "set"
        } else {
            "-"
        },
    );
    output::kv(
        "Client credentials",
        if credentials.has_client_credentials() { "set" } else { "-" },
    );

    let apihub = config.apihub();
    output::header("Apigee API Hub");
    output::kv("Project", apihub.project.as_deref().unwrap_or("-"));
    output::kv("Region", apihub.region.as_deref().unwrap_or("-"));
    output::kv("Endpoint", &apihub.endpoint);
    output::kv("Token", if apihub.token.is_some() { "set" } else { "-" });

    output::header("Staging");
    output::kv("Directory", config.staging_dir().as_str());

    Ok(())
}
