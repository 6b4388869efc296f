//! txdash main entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::runtime::Runtime;
use txdash_api::{start_server, AppState};
use txdash_config::{Config, ConfigResult};
use txdash_core::HttpTransactionClient;

#[derive(Parser, Debug)]
#[command(name = "txdash")]
#[command(author = "txdash Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight transaction dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the upstream API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the listening port
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            // the logger is configured from this file, so report on stderr
            eprintln!("{}", e.report());
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if !args.config.exists() {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    let client = HttpTransactionClient::from_config(&config.api)
        .context("Failed to build HTTP client")?;
    log::info!(
        "Config loaded: upstream={}, page_size={}",
        client.endpoint(),
        config.pagination.page_size
    );
    let state = AppState::new(config, Arc::new(client));

    let rt = Runtime::new()?;
    rt.block_on(async {
        match state.dashboard.load().await {
            Ok(()) => log::info!("Initial transaction load complete"),
            Err(e) => log::error!("Initial transaction load failed: {}", e),
        }

        start_server(state).await.context("Server error")
    })
}

/// Load the configuration file and apply command line overrides
fn load_config(args: &Args) -> ConfigResult<Config> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}
