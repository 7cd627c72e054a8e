//! CLI argument parsing with clap

use apimsync_core::config::{AzureCredentials, ConfigOverrides};
use apimsync_core::types::{DestinationPlatform, SourcePlatform};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// apimsync - Migrate API metadata between API-management platforms
#[derive(Parser, Debug)]
#[command(name = "apimsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to apimsync.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Root of the staging area
    #[arg(long, global = true, env = "APIMSYNC_STAGING_DIR")]
    pub staging_dir: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub azure: AzureArgs,

    #[command(flatten)]
    pub apihub: ApiHubArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Values from flags and the environment that override the config file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            staging_dir: self.staging_dir.clone(),
            azure_subscription: self.azure.subscription.clone(),
            azure_resource_group: self.azure.resource_group.clone(),
            azure_service_name: self.azure.service_name.clone(),
            azure_credentials: AzureCredentials {
                token: self.azure.token.clone(),
                env_token: self.azure.env_token.clone(),
                client_id: self.azure.client_id.clone(),
                client_secret: self.azure.client_secret.clone(),
                tenant_id: self.azure.tenant_id.clone(),
            },
            apihub_project: self.apihub.project.clone(),
            apihub_region: self.apihub.region.clone(),
            apihub_token: self.apihub.token.clone(),
        }
    }
}

/// Azure API Management connection options
#[derive(Args, Debug, Default)]
pub struct AzureArgs {
    /// Azure subscription id
    #[arg(long = "azure-subscription", global = true, env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription: Option<String>,

    /// Azure resource group of the API Management service
    #[arg(long = "azure-resource-group", global = true, env = "AZURE_RESOURCE_GROUP")]
    pub resource_group: Option<String>,

    /// Azure API Management service name
    #[arg(long = "azure-service", global = true, env = "AZURE_SERVICE_NAME")]
    pub service_name: Option<String>,

    /// Azure management bearer token
    #[arg(long = "token", global = true)]
    pub token: Option<String>,

    /// Azure management bearer token from the environment
    #[arg(
        long = "azure-token",
        global = true,
        env = "AZURE_TOKEN",
        hide = true,
        hide_env_values = true
    )]
    pub env_token: Option<String>,

    /// Azure AD application (client) id
    #[arg(long = "azure-client-id", global = true, env = "AZURE_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Azure AD application secret
    #[arg(
        long = "azure-client-secret",
        global = true,
        env = "AZURE_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Azure AD tenant id
    #[arg(long = "azure-tenant-id", global = true, env = "AZURE_TENANT_ID")]
    pub tenant_id: Option<String>,
}

/// Apigee API Hub connection options
#[derive(Args, Debug, Default)]
pub struct ApiHubArgs {
    /// Google Cloud project hosting API Hub
    #[arg(long = "apihub-project", global = true, env = "APIGEE_PROJECT")]
    pub project: Option<String>,

    /// API Hub region
    #[arg(long = "apihub-region", global = true, env = "APIGEE_REGION")]
    pub region: Option<String>,

    /// API Hub bearer token
    #[arg(
        id = "apihub_token",
        long = "apihub-token",
        global = true,
        env = "APIHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show connection status of every platform
    Status(StatusArgs),

    /// Export APIs from a source platform into staging
    Export(ExportArgs),

    /// Convert staged exports into canonical records
    Offramp(OfframpArgs),

    /// Convert canonical records into destination records
    Onramp(OnrampArgs),

    /// Import staged destination records into the catalog
    Import(ImportArgs),

    /// Run export, offramp, onramp and import in one go
    Sync(SyncArgs),

    /// Remove the staged exports of a source platform
    Clean(CleanArgs),

    /// Serve the status and sync endpoints over HTTP
    Serve(ServeArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

// Status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Source platform
    #[arg(default_value = "azure")]
    pub platform: SourcePlatform,

    /// Only export the API with this platform name
    #[arg(long)]
    pub api: Option<String>,

    /// Skip APIs that are already staged
    #[arg(long)]
    pub only_new: bool,
}

// Offramp command
#[derive(Args, Debug)]
pub struct OfframpArgs {
    /// Source platform
    #[arg(default_value = "azure")]
    pub platform: SourcePlatform,

    /// Only process this group
    #[arg(short, long)]
    pub group: Option<String>,
}

// Onramp command
#[derive(Args, Debug)]
pub struct OnrampArgs {
    /// Destination platform
    #[arg(default_value = "apihub")]
    pub platform: DestinationPlatform,

    /// Only process this group
    #[arg(short, long)]
    pub group: Option<String>,
}

// Import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Destination platform
    #[arg(default_value = "apihub")]
    pub platform: DestinationPlatform,
}

// Sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Platform to offramp the APIs from
    #[arg(long, default_value = "azure")]
    pub offramp: SourcePlatform,

    /// Platform to onramp the APIs to
    #[arg(long, default_value = "apihub")]
    pub onramp: DestinationPlatform,

    /// Skip APIs that are already staged
    #[arg(long)]
    pub only_new: bool,

    /// Output the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

// Clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Source platform
    #[arg(default_value = "azure")]
    pub platform: SourcePlatform,
}

// Serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
