use std::path::PathBuf;

use clap::Parser;
use runtime_sweep::aws::AwsClient;
use runtime_sweep::cli::CommonArgs;
use runtime_sweep::filter::run_filter;
use runtime_sweep::{logging, AppError};
use tracing::error;

/// Keep only the discovered automation documents whose script steps run
/// an outdated Python runtime.
#[derive(Parser)]
#[command(name = "filter_ssm_documents")]
struct Cli {
    #[arg(long, env = "RUNTIME_SWEEP_FILTER_LOG", default_value = "filter_ssm_documents.log")]
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
    run_filter(&client, &config).await
        .map(|_| ())
        .inspect_err(|e| error!("Filtering failed: {}", e))
}
