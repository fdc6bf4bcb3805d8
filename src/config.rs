use std::path::PathBuf;

use crate::RuntimeFilter;

pub const DEFAULT_TARGET_RUNTIME: &str = "python3.12";
pub const DEFAULT_PLACEHOLDER_ACCOUNT_ID: &str = "123456789012";

/// Settings shared by every stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Function ARNs written by discovery and read by upgrade.
    /// Default `lambda_functions_to_update.txt`.
    pub lambda_candidates: PathBuf,
    /// Every self-owned automation document ARN found by discovery.
    /// Default `ssm_automations_to_update.txt`.
    pub ssm_candidates: PathBuf,
    /// Documents confirmed to use an outdated runtime; upgrade's SSM input.
    /// Default `ssm_automations_filtered.txt`.
    pub ssm_filtered: PathBuf,
    /// Scratch directory for staged document revisions. Default `.runtime_sweep`.
    pub work_dir: PathBuf,
    pub outdated_runtimes: RuntimeFilter,
    /// Default `python3.12`.
    pub target_runtime: String,
    /// Used for ARN reconstruction when the identity service is unreachable.
    pub placeholder_account_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lambda_candidates: PathBuf::from("lambda_functions_to_update.txt"),
            ssm_candidates: PathBuf::from("ssm_automations_to_update.txt"),
            ssm_filtered: PathBuf::from("ssm_automations_filtered.txt"),
            work_dir: PathBuf::from(".runtime_sweep"),
            outdated_runtimes: RuntimeFilter::default(),
            target_runtime: String::from(DEFAULT_TARGET_RUNTIME),
            placeholder_account_id: String::from(DEFAULT_PLACEHOLDER_ACCOUNT_ID),
        }
    }
}

impl Config {
    /// Defaults with every path placed under `dir`.
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let defaults = Self::default();
        Self {
            lambda_candidates: dir.join(defaults.lambda_candidates),
            ssm_candidates: dir.join(defaults.ssm_candidates),
            ssm_filtered: dir.join(defaults.ssm_filtered),
            work_dir: dir.join(defaults.work_dir),
            ..defaults
        }
    }
}
