//! The provider seam. Stages talk to a [`CloudClient`] and never to a
//! transport directly, so they run unchanged against the AWS SDK, the
//! dry-run simulator, or an in-memory fake.

use async_trait::async_trait;

use crate::RuntimeFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The provider could not be reached at all (no credentials, dispatch
    /// or timeout failure).
    Unavailable(String),
    Service { operation: &'static str, message: String },
    MissingField { operation: &'static str, field: &'static str },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Unavailable(msg) => write!(f, "client unavailable: {}", msg),
            ClientError::Service { operation, message } => write!(f, "{} failed: {}", operation, message),
            ClientError::MissingField { operation, field } => {
                write!(f, "{} response has no {}", operation, field)
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Owner/type predicate for document listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    pub owner: String,
    pub document_type: String,
}

impl DocumentFilter {
    pub fn self_owned_automation() -> Self {
        Self {
            owner: String::from("Self"),
            document_type: String::from("Automation"),
        }
    }
}

#[async_trait]
pub trait CloudClient: Send + Sync {
    async fn account_id(&self) -> Result<String, ClientError>;

    /// ARNs of functions in `region` whose runtime matches `filter`.
    async fn list_functions(&self, region: &str, filter: &RuntimeFilter) -> Result<Vec<String>, ClientError>;

    /// Names of documents in `region` matching `filter`.
    async fn list_documents(&self, region: &str, filter: &DocumentFilter) -> Result<Vec<String>, ClientError>;

    /// JSON content of the document's current version.
    async fn get_document(&self, region: &str, name: &str) -> Result<String, ClientError>;

    async fn update_function_runtime(&self, region: &str, name: &str, runtime: &str) -> Result<(), ClientError>;

    /// Submits `content` as a new version and returns the version id.
    async fn update_document(&self, region: &str, name: &str, content: &str) -> Result<String, ClientError>;
}
