//! Omise command line client
//!
//! Calls the Omise vault and API servers with a public key and prints the
//! results as JSON.

mod commands;
mod config;

use clap::Parser;
use commands::Command;
use config::{ConfigLoader, Overrides};
use omise_sdk::Client;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Omise - tokens, sources and charge status from the command line
#[derive(Parser, Debug)]
#[command(name = "omise")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./omise.toml")]
    config: PathBuf,

    /// Public key, overriding the configuration file
    #[arg(long, env = "OMISE_PUBLIC_KEY", hide_env_values = true)]
    public_key: Option<String>,

    /// Override the API server base URL
    #[arg(long)]
    api_url: Option<Url>,

    /// Override the vault server base URL
    #[arg(long)]
    vault_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::debug!("Starting omise v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let loader = ConfigLoader::new(
        &args.config,
        Overrides {
            public_key: args.public_key,
            api_url: args.api_url,
            vault_url: args.vault_url,
        },
    );
    let client_config = loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let client = Client::new(client_config);

    commands::run(&client, args.command).await.map_err(|e| {
        if let Some(suggestion) = e
            .downcast_ref::<omise_sdk::ClientError>()
            .and_then(|error| error.recovery_suggestion())
        {
            tracing::error!("{}", suggestion);
        }
        e
    })
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so stdout carries only JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
