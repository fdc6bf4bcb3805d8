use std::path::PathBuf;

use clap::Parser;
use runtime_sweep::aws::AwsClient;
use runtime_sweep::cli::CommonArgs;
use runtime_sweep::simulated::SimulatedClient;
use runtime_sweep::upgrade::run_upgrade;
use runtime_sweep::{logging, AppError};
use tracing::{error, info};

/// Move every candidate function and document onto the target runtime.
#[derive(Parser)]
#[command(name = "upgrade")]
struct Cli {
    /// Log and record updates without calling the provider
    #[arg(long)]
    dry_run: bool,
    /// Document ARN input; defaults to the filtered document list
    #[arg(long, env = "RUNTIME_SWEEP_SSM_INPUT")]
    ssm_input: Option<PathBuf>,
    #[arg(long, env = "RUNTIME_SWEEP_UPGRADE_LOG", default_value = "upgrade_runtimes.log")]
    log_file: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(&cli.log_file, logging::parse_level(&cli.common.log_level)?)?;
    let config = cli.common.config()?;
    let ssm_input = cli.ssm_input.unwrap_or_else(|| config.ssm_filtered.clone());

    let result = if cli.dry_run {
        let marker = config.outdated_runtimes.runtimes().first().cloned().unwrap_or_default();
        info!("Dry run: document content is synthesized with runtime {}", marker);
        run_upgrade(&SimulatedClient::new(marker), &config, &ssm_input).await
    } else {
        let client = AwsClient::from_env().await;
        run_upgrade(&client, &config, &ssm_input).await
    };
    result
        .map(|_| ())
        .inspect_err(|e| error!("Upgrade aborted: {}", e))
}
