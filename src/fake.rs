//! Scripted in-memory [`CloudClient`] for tests.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::{ClientError, CloudClient, DocumentFilter};
use crate::RuntimeFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListFunctions(String),
    ListDocuments(String),
    GetDocument(String, String),
    UpdateFunction(String, String, String),
    UpdateDocument(String, String, String),
}

pub struct FakeClient {
    pub account: Result<String, ClientError>,
    /// region -> (arn, runtime)
    pub functions: HashMap<String, Vec<(String, String)>>,
    /// region -> (name, owner, type)
    pub documents: HashMap<String, Vec<(String, String, String)>>,
    /// (region, name) -> content
    pub contents: HashMap<(String, String), String>,
    /// Both listings fail in these regions.
    pub failing_regions: HashSet<String>,
    /// Only the function listing fails in these regions.
    pub failing_function_regions: HashSet<String>,
    pub failing_updates: HashSet<String>,
    /// Every document and update call answers `Unavailable`.
    pub unreachable: bool,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            account: Ok(String::from("111122223333")),
            functions: HashMap::new(),
            documents: HashMap::new(),
            contents: HashMap::new(),
            failing_regions: HashSet::new(),
            failing_function_regions: HashSet::new(),
            failing_updates: HashSet::new(),
            unreachable: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

fn rejected(operation: &'static str, what: &str) -> ClientError {
    ClientError::Service {
        operation,
        message: format!("scripted failure for {}", what),
    }
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(mut self, region: &str, name: &str, runtime: &str) -> Self {
        let arn = format!("arn:aws:lambda:{}:111122223333:function:{}", region, name);
        self.functions
            .entry(region.to_string())
            .or_default()
            .push((arn, runtime.to_string()));
        self
    }

    pub fn with_document(mut self, region: &str, name: &str, owner: &str, content: Option<&str>) -> Self {
        self.documents
            .entry(region.to_string())
            .or_default()
            .push((name.to_string(), owner.to_string(), String::from("Automation")));
        if let Some(content) = content {
            self.contents
                .insert((region.to_string(), name.to_string()), content.to_string());
        }
        self
    }

    pub fn failing_region(mut self, region: &str) -> Self {
        self.failing_regions.insert(region.to_string());
        self
    }

    pub fn failing_functions_in(mut self, region: &str) -> Self {
        self.failing_function_regions.insert(region.to_string());
        self
    }

    pub fn failing_update(mut self, name: &str) -> Self {
        self.failing_updates.insert(name.to_string());
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }

    fn check_reachable(&self, operation: &str) -> Result<(), ClientError> {
        if self.unreachable {
            return Err(ClientError::Unavailable(format!("{}: no credentials", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl CloudClient for FakeClient {
    async fn account_id(&self) -> Result<String, ClientError> {
        self.account.clone()
    }

    async fn list_functions(&self, region: &str, filter: &RuntimeFilter) -> Result<Vec<String>, ClientError> {
        self.record(Call::ListFunctions(region.to_string()));
        if self.failing_regions.contains(region) || self.failing_function_regions.contains(region) {
            return Err(rejected("ListFunctions", region));
        }
        Ok(self
            .functions
            .get(region)
            .into_iter()
            .flatten()
            .filter(|(_, runtime)| filter.matches(runtime))
            .map(|(arn, _)| arn.clone())
            .collect())
    }

    async fn list_documents(&self, region: &str, filter: &DocumentFilter) -> Result<Vec<String>, ClientError> {
        self.record(Call::ListDocuments(region.to_string()));
        if self.failing_regions.contains(region) {
            return Err(rejected("ListDocuments", region));
        }
        Ok(self
            .documents
            .get(region)
            .into_iter()
            .flatten()
            .filter(|(_, owner, kind)| *owner == filter.owner && *kind == filter.document_type)
            .map(|(name, _, _)| name.clone())
            .collect())
    }

    async fn get_document(&self, region: &str, name: &str) -> Result<String, ClientError> {
        self.record(Call::GetDocument(region.to_string(), name.to_string()));
        self.check_reachable("GetDocument")?;
        self.contents
            .get(&(region.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| rejected("GetDocument", name))
    }

    async fn update_function_runtime(&self, region: &str, name: &str, runtime: &str) -> Result<(), ClientError> {
        self.record(Call::UpdateFunction(region.to_string(), name.to_string(), runtime.to_string()));
        self.check_reachable("UpdateFunctionConfiguration")?;
        if self.failing_updates.contains(name) {
            return Err(rejected("UpdateFunctionConfiguration", name));
        }
        Ok(())
    }

    async fn update_document(&self, region: &str, name: &str, content: &str) -> Result<String, ClientError> {
        self.record(Call::UpdateDocument(region.to_string(), name.to_string(), content.to_string()));
        self.check_reachable("UpdateDocument")?;
        if self.failing_updates.contains(name) {
            return Err(rejected("UpdateDocument", name));
        }
        Ok(String::from("2"))
    }
}

/// Collects formatted log output for assertions. Install with
/// `tracing::subscriber::set_default(logs.subscriber())` on a
/// current-thread runtime.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_target(false)
            .with_writer(move || logs.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("poisoned mutex")).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("poisoned mutex").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
