//! Stage 1: per-region inventory of outdated functions and self-owned
//! automation documents.
//!
//! Document discovery is deliberately broad: every self-owned automation
//! document is a candidate, and [`crate::filter`] narrows the list by
//! content afterwards.

use tracing::{error, info, warn};

use crate::arn::ssm_document_arn;
use crate::candidates::write_candidates;
use crate::client::{ClientError, CloudClient, DocumentFilter};
use crate::{AppError, Config};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inventory {
    Functions,
    Documents,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFailure {
    pub region: String,
    pub inventory: Inventory,
    pub error: ClientError,
}

#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub account_id: String,
    pub function_arns: Vec<String>,
    pub document_arns: Vec<String>,
    pub failures: Vec<RegionFailure>,
}

/// An unreachable identity service degrades to the configured placeholder
/// account; any other lookup failure is fatal.
pub async fn resolve_account_id(client: &dyn CloudClient, config: &Config) -> Result<String, AppError> {
    match client.account_id().await {
        Ok(account_id) => {
            info!("Using account {}", account_id);
            Ok(account_id)
        }
        Err(ClientError::Unavailable(reason)) => {
            warn!(
                "Identity lookup unavailable ({}); using placeholder account {}",
                reason, config.placeholder_account_id
            );
            Ok(config.placeholder_account_id.clone())
        }
        Err(e) => Err(AppError::Identity(e)),
    }
}

/// Queries every region in order. A failed listing skips that region's
/// inventory and is recorded in the report; nothing is retried.
pub async fn discover(client: &dyn CloudClient, config: &Config, regions: &[String]) -> Result<DiscoveryReport, AppError> {
    if regions.is_empty() {
        return Err(AppError::NoRegions);
    }
    let account_id = resolve_account_id(client, config).await?;
    Ok(scan_regions(client, config, regions, account_id).await)
}

async fn scan_regions(client: &dyn CloudClient, config: &Config, regions: &[String], account_id: String) -> DiscoveryReport {
    let document_filter = DocumentFilter::self_owned_automation();
    let mut report = DiscoveryReport {
        account_id,
        ..Default::default()
    };

    for region in regions {
        info!("Scanning region {}", region);

        match client.list_functions(region, &config.outdated_runtimes).await {
            Ok(arns) => {
                info!("Found {} outdated function(s) in {}", arns.len(), region);
                report.function_arns.extend(arns);
            }
            Err(e) => {
                error!("Listing functions in {} failed: {}", region, e);
                report.failures.push(RegionFailure {
                    region: region.clone(),
                    inventory: Inventory::Functions,
                    error: e,
                });
            }
        }

        match client.list_documents(region, &document_filter).await {
            Ok(names) => {
                info!("Found {} self-owned automation document(s) in {}", names.len(), region);
                report.document_arns.extend(
                    names
                        .iter()
                        .map(|name| ssm_document_arn(region, &report.account_id, name)),
                );
            }
            Err(e) => {
                error!("Listing documents in {} failed: {}", region, e);
                report.failures.push(RegionFailure {
                    region: region.clone(),
                    inventory: Inventory::Documents,
                    error: e,
                });
            }
        }
    }

    report
}

/// Runs discovery and rewrites both candidate files. The files are
/// truncated before the first region is scanned, and left untouched when
/// the run fails before that point.
pub async fn run_discovery(client: &dyn CloudClient, config: &Config, regions: &[String]) -> Result<DiscoveryReport, AppError> {
    if regions.is_empty() {
        return Err(AppError::NoRegions);
    }
    let account_id = resolve_account_id(client, config).await?;

    write_candidates(&config.lambda_candidates, &[])?;
    write_candidates(&config.ssm_candidates, &[])?;

    let report = scan_regions(client, config, regions, account_id).await;

    write_candidates(&config.lambda_candidates, &report.function_arns)?;
    write_candidates(&config.ssm_candidates, &report.document_arns)?;

    info!(
        "Wrote {} function ARN(s) to {}",
        report.function_arns.len(),
        config.lambda_candidates.display()
    );
    info!(
        "Wrote {} document ARN(s) to {} (content filtering still required)",
        report.document_arns.len(),
        config.ssm_candidates.display()
    );
    if !report.failures.is_empty() {
        warn!("{} regional listing(s) failed; see errors above", report.failures.len());
    }
    Ok(report)
}
