use std::path::PathBuf;

use clap::Parser;
use runtime_sweep::aws::AwsClient;
use runtime_sweep::cli::CommonArgs;
use runtime_sweep::discover::run_discovery;
use runtime_sweep::{logging, AppError};
use tracing::error;

/// List functions on outdated Python runtimes and every self-owned
/// automation document in the given regions.
#[derive(Parser)]
#[command(name = "discover")]
struct Cli {
    /// Regions to scan, in order
    #[arg(required = true)]
    regions: Vec<String>,
    #[arg(long, env = "RUNTIME_SWEEP_DISCOVER_LOG", default_value = "discover_resources.log")]
    log_file: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(&cli.log_file, logging::parse_level(&cli.common.log_level)?)?;
    let config = cli.common.config()?;

    let client = AwsClient::from_env().await;
    run_discovery(&client, &config, &cli.regions).await
        .map(|_| ())
        .inspect_err(|e| error!("Discovery aborted: {}", e))
}
