//! Stage 3: move every candidate onto the target runtime.
//!
//! Best effort throughout: a record that fails to parse, fetch, or update
//! is logged and counted, and the next record is processed.

use std::io::Write;
use std::path::Path;

use tracing::{error, info, warn};

use crate::arn::{ResourceKind, ResourceRef};
use crate::candidates::read_candidates;
use crate::client::CloudClient;
use crate::document::rewrite_runtime;
use crate::{AppError, Config};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeReport {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeSummary {
    pub functions: UpgradeReport,
    pub documents: UpgradeReport,
}

pub async fn upgrade_functions(client: &dyn CloudClient, config: &Config, arns: &[String]) -> UpgradeReport {
    let mut report = UpgradeReport::default();
    for arn in arns {
        let Some(function) = ResourceRef::parse(arn, ResourceKind::Function) else {
            error!("Could not parse region or function name from '{}'", arn);
            report.failed += 1;
            continue;
        };
        info!(
            "Updating function {} in {} to {}",
            function.name, function.region, config.target_runtime
        );
        match client
            .update_function_runtime(&function.region, &function.name, &config.target_runtime)
            .await
        {
            Ok(()) => {
                info!("Updated function {}", function.name);
                report.updated += 1;
            }
            Err(e) => {
                error!("Updating function {} in {} failed: {}", function.name, function.region, e);
                report.failed += 1;
            }
        }
    }
    report
}

enum DocumentOutcome {
    Updated(String),
    Current,
}

/// Writes the revision to a scratch file in `work_dir` and submits what
/// was written. The file is removed when this returns.
async fn submit_staged(
    client: &dyn CloudClient,
    work_dir: &Path,
    doc: &ResourceRef,
    content: &str,
) -> Result<String, String> {
    let mut staged = tempfile::Builder::new()
        .prefix("ssm-document-")
        .suffix(".json")
        .tempfile_in(work_dir)
        .map_err(|e| format!("staging failed: {}", e))?;
    staged
        .write_all(content.as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|e| format!("staging failed: {}", e))?;
    let staged_content = std::fs::read_to_string(staged.path())
        .map_err(|e| format!("reading staged content failed: {}", e))?;

    client
        .update_document(&doc.region, &doc.name, &staged_content)
        .await
        .map_err(|e| e.to_string())
}

async fn upgrade_document(client: &dyn CloudClient, config: &Config, doc: &ResourceRef) -> Result<DocumentOutcome, String> {
    let content = client
        .get_document(&doc.region, &doc.name)
        .await
        .map_err(|e| format!("fetch failed: {}", e))?;
    let rewritten = rewrite_runtime(&content, &config.outdated_runtimes, &config.target_runtime)
        .map_err(|e| e.to_string())?;
    if rewritten.steps_rewritten == 0 {
        return Ok(DocumentOutcome::Current);
    }
    info!(
        "Rewrote {} step(s) of {} to {}",
        rewritten.steps_rewritten, doc.name, config.target_runtime
    );
    let version = submit_staged(client, &config.work_dir, doc, &rewritten.content).await?;
    Ok(DocumentOutcome::Updated(version))
}

pub async fn upgrade_documents(client: &dyn CloudClient, config: &Config, arns: &[String]) -> Result<UpgradeReport, AppError> {
    let mut report = UpgradeReport::default();
    if arns.is_empty() {
        return Ok(report);
    }
    std::fs::create_dir_all(&config.work_dir).map_err(|e| AppError::io(&config.work_dir, e))?;

    for arn in arns {
        let Some(doc) = ResourceRef::parse(arn, ResourceKind::Document) else {
            error!("Could not parse region or document name from '{}'", arn);
            report.failed += 1;
            continue;
        };
        info!("Updating document {} in {}", doc.name, doc.region);
        match upgrade_document(client, config, &doc).await {
            Ok(DocumentOutcome::Updated(version)) => {
                info!("Updated document {} (version {})", doc.name, version);
                report.updated += 1;
            }
            Ok(DocumentOutcome::Current) => {
                info!("Document {} has no outdated runtime; skipping", doc.name);
                report.skipped += 1;
            }
            Err(e) => {
                error!("Updating document {} in {} failed: {}", doc.name, doc.region, e);
                report.failed += 1;
            }
        }
    }
    // Fails, and keeps the directory, if anything else still lives in it.
    let _ = std::fs::remove_dir(&config.work_dir);
    Ok(report)
}

/// `None` and an empty list are both a no-op.
fn load(path: &Path, what: &str) -> Result<Vec<String>, AppError> {
    match read_candidates(path)? {
        Some(arns) if !arns.is_empty() => Ok(arns),
        Some(_) => {
            info!("{} is empty; no {} to update", path.display(), what);
            Ok(Vec::new())
        }
        None => {
            info!("{} not found; no {} to update", path.display(), what);
            Ok(Vec::new())
        }
    }
}

/// Upgrades `lambda_candidates`, then the documents listed in `ssm_input`.
/// Only I/O errors on the edges fail the run.
pub async fn run_upgrade(client: &dyn CloudClient, config: &Config, ssm_input: &Path) -> Result<UpgradeSummary, AppError> {
    let function_arns = load(&config.lambda_candidates, "functions")?;
    let functions = upgrade_functions(client, config, &function_arns).await;
    info!(
        "Functions: {} updated, {} failed",
        functions.updated, functions.failed
    );

    let document_arns = load(ssm_input, "documents")?;
    let documents = upgrade_documents(client, config, &document_arns).await?;
    info!(
        "Documents: {} updated, {} already current, {} failed",
        documents.updated, documents.skipped, documents.failed
    );

    if functions.failed + documents.failed > 0 {
        warn!("Some updates failed; see errors above");
    }
    Ok(UpgradeSummary { functions, documents })
}
