use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::client::{ClientError, CloudClient, DocumentFilter};
use crate::document::placeholder_document;
use crate::RuntimeFilter;

/// Dry-run client. Document content is synthesized from the placeholder
/// template and every update is logged and recorded instead of sent.
pub struct SimulatedClient {
    old_runtime: String,
    updates: Mutex<Vec<String>>,
}

impl SimulatedClient {
    /// `old_runtime` is the marker embedded in synthesized documents.
    pub fn new(old_runtime: impl Into<String>) -> Self {
        Self {
            old_runtime: old_runtime.into(),
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Simulated update calls so far, as `<operation> <region>/<name> ...`.
    pub fn updates(&self) -> Vec<String> {
        self.updates.lock().map(|u| u.clone()).unwrap_or_default()
    }

    fn record(&self, line: String) {
        info!("[simulated] {}", line);
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(line);
        }
    }
}

#[async_trait]
impl CloudClient for SimulatedClient {
    async fn account_id(&self) -> Result<String, ClientError> {
        Err(ClientError::Unavailable(String::from("simulated client has no identity")))
    }

    async fn list_functions(&self, _region: &str, _filter: &RuntimeFilter) -> Result<Vec<String>, ClientError> {
        Ok(Vec::new())
    }

    async fn list_documents(&self, _region: &str, _filter: &DocumentFilter) -> Result<Vec<String>, ClientError> {
        Ok(Vec::new())
    }

    async fn get_document(&self, _region: &str, name: &str) -> Result<String, ClientError> {
        Ok(placeholder_document(name, &self.old_runtime))
    }

    async fn update_function_runtime(&self, region: &str, name: &str, runtime: &str) -> Result<(), ClientError> {
        self.record(format!("UpdateFunctionConfiguration {}/{} runtime={}", region, name, runtime));
        Ok(())
    }

    async fn update_document(&self, region: &str, name: &str, content: &str) -> Result<String, ClientError> {
        self.record(format!("UpdateDocument {}/{} content={}", region, name, content));
        Ok(String::from("$LATEST"))
    }
}
