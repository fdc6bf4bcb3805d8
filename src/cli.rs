use std::path::PathBuf;

use clap::Args;

use crate::config::{DEFAULT_PLACEHOLDER_ACCOUNT_ID, DEFAULT_TARGET_RUNTIME};
use crate::runtime_filter::DEFAULT_OUTDATED_RUNTIMES;
use crate::{AppError, Config, RuntimeFilter};

/// Flags shared by every stage binary.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Function ARN candidate file
    #[arg(long, env = "RUNTIME_SWEEP_LAMBDA_CANDIDATES", default_value = "lambda_functions_to_update.txt")]
    pub lambda_candidates: PathBuf,
    /// Self-owned automation document ARN file written by discovery
    #[arg(long, env = "RUNTIME_SWEEP_SSM_CANDIDATES", default_value = "ssm_automations_to_update.txt")]
    pub ssm_candidates: PathBuf,
    /// Documents confirmed to use an outdated runtime
    #[arg(long, env = "RUNTIME_SWEEP_SSM_FILTERED", default_value = "ssm_automations_filtered.txt")]
    pub ssm_filtered: PathBuf,
    /// Scratch directory for staged document revisions
    #[arg(long, env = "RUNTIME_SWEEP_WORK_DIR", default_value = ".runtime_sweep")]
    pub work_dir: PathBuf,
    /// Comma-separated runtimes considered outdated
    #[arg(long, env = "RUNTIME_SWEEP_OLD_RUNTIMES", default_value_t = DEFAULT_OUTDATED_RUNTIMES.join(","))]
    pub old_runtimes: String,
    /// Runtime every candidate is moved to
    #[arg(long, env = "RUNTIME_SWEEP_TARGET_RUNTIME", default_value = DEFAULT_TARGET_RUNTIME)]
    pub target_runtime: String,
    /// Account id used in document ARNs when the identity service is unreachable
    #[arg(long, env = "RUNTIME_SWEEP_PLACEHOLDER_ACCOUNT_ID", default_value = DEFAULT_PLACEHOLDER_ACCOUNT_ID)]
    pub placeholder_account_id: String,
    /// error, warn, info, debug or trace
    #[arg(long, env = "RUNTIME_SWEEP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl CommonArgs {
    pub fn config(&self) -> Result<Config, AppError> {
        Ok(Config {
            lambda_candidates: self.lambda_candidates.clone(),
            ssm_candidates: self.ssm_candidates.clone(),
            ssm_filtered: self.ssm_filtered.clone(),
            work_dir: self.work_dir.clone(),
            outdated_runtimes: RuntimeFilter::parse_list(&self.old_runtimes)?,
            target_runtime: self.target_runtime.clone(),
            placeholder_account_id: self.placeholder_account_id.clone(),
        })
    }
}
