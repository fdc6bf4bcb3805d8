//! Stage 2: narrow the broad document candidate list down to documents
//! whose content actually pins an outdated runtime.

use tracing::{debug, error, info, warn};

use crate::arn::{ResourceKind, ResourceRef};
use crate::candidates::{read_candidates, write_candidates};
use crate::client::{ClientError, CloudClient};
use crate::document::outdated_step;
use crate::{AppError, Config};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub processed: usize,
    pub matching: Vec<String>,
}

/// Keeps the ARNs whose document has an outdated script step, in input
/// order. Unparseable ARNs and unreadable documents are logged and dropped;
/// an unreachable provider stops the pass.
pub async fn filter_documents(client: &dyn CloudClient, config: &Config, arns: &[String]) -> Result<FilterReport, ClientError> {
    let mut report = FilterReport::default();
    for arn in arns {
        report.processed += 1;
        debug!("Processing ARN: {}", arn);
        let Some(doc) = ResourceRef::parse(arn, ResourceKind::Document) else {
            warn!("Could not parse ARN '{}'. Skipping.", arn);
            continue;
        };
        let content = match client.get_document(&doc.region, &doc.name).await {
            Ok(content) => content,
            Err(e @ ClientError::Unavailable(_)) => {
                error!("Provider unavailable while fetching '{}'. Aborting.", doc.name);
                return Err(e);
            }
            Err(e) => {
                error!("Fetching document '{}' in {} failed: {}", doc.name, doc.region, e);
                continue;
            }
        };
        match outdated_step(&content, &config.outdated_runtimes) {
            Ok(Some((step, runtime))) => {
                info!("Found outdated runtime {} in step '{}' of {}", runtime, step, arn);
                report.matching.push(arn.clone());
            }
            Ok(None) => debug!("Document '{}' has no outdated runtime", doc.name),
            Err(e) => error!("Document '{}': {}", doc.name, e),
        }
    }
    Ok(report)
}

/// Reads `ssm_candidates`, writes `ssm_filtered`. A missing input file is
/// an error; an empty one produces an empty output file. The output is not
/// touched when the provider is unreachable.
pub async fn run_filter(client: &dyn CloudClient, config: &Config) -> Result<FilterReport, AppError> {
    info!("Starting SSM document filtering");
    info!("Input file: {}", config.ssm_candidates.display());
    info!("Output file: {}", config.ssm_filtered.display());
    info!("Outdated runtimes: {:?}", config.outdated_runtimes.runtimes());

    let Some(arns) = read_candidates(&config.ssm_candidates)? else {
        error!("Input file '{}' not found", config.ssm_candidates.display());
        return Err(AppError::io(
            &config.ssm_candidates,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    };

    if arns.is_empty() {
        info!("Input file is empty. No documents to process.");
        write_candidates(&config.ssm_filtered, &[])?;
        return Ok(FilterReport::default());
    }

    let report = filter_documents(client, config, &arns)
        .await
        .map_err(AppError::Provider)?;
    write_candidates(&config.ssm_filtered, &report.matching)?;

    info!("Processed {} document(s)", report.processed);
    info!("Found {} document(s) with outdated runtimes", report.matching.len());
    info!("Filtered list saved to '{}'", config.ssm_filtered.display());
    Ok(report)
}
