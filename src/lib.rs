pub mod arn;
pub mod aws;
pub mod candidates;
pub mod cli;
pub mod client;
pub mod config;
pub mod discover;
pub mod document;
pub mod filter;
pub mod logging;
pub mod runtime_filter;
pub mod simulated;
pub mod upgrade;

#[cfg(test)]
mod fake;

use std::path::PathBuf;

pub use client::{ClientError, CloudClient, DocumentFilter};
pub use config::Config;
pub use runtime_filter::RuntimeFilter;

#[derive(Debug)]
pub enum AppError {
    NoRegions,
    Identity(ClientError),
    /// The provider became unreachable mid-run.
    Provider(ClientError),
    Io { path: PathBuf, source: std::io::Error },
    Config(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io { path: path.into(), source }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NoRegions => write!(f, "App Error: at least one region is required"),
            AppError::Identity(e) => write!(f, "App Error: account lookup failed: {}", e),
            AppError::Provider(e) => write!(f, "App Error: {}", e),
            AppError::Io { path, source } => write!(f, "App Error: {}: {}", path.display(), source),
            AppError::Config(msg) => write!(f, "App Error: invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Identity(e) | AppError::Provider(e) => Some(e),
            AppError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
