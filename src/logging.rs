use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::AppError;

pub fn parse_level(raw: &str) -> Result<LevelFilter, AppError> {
    raw.parse::<LevelFilter>()
        .map_err(|_| AppError::Config(format!("invalid log level '{}'", raw)))
}

/// Timestamped records go to stdout and to `log_file`, which is truncated
/// first.
pub fn init(log_file: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = File::create(log_file).map_err(|e| AppError::io(log_file, e))?;

    tracing_subscriber::registry()
        .with(level)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
        )
        .try_init()
        .map_err(|e| AppError::Config(format!("logging setup failed: {}", e)))
}
