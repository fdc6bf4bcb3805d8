//! Fixed-position field extraction for Lambda function and SSM document ARNs.
//!
//! None of these functions validate the ARN beyond the split itself. An empty
//! result means the field was absent; callers log and skip the record.

/// Region: the 4th colon-delimited field.
pub fn region_of(arn: &str) -> &str {
    arn.split(':').nth(3).unwrap_or("")
}

/// Function name: the 7th colon-delimited field of
/// `arn:aws:lambda:<region>:<account>:function:<name>`.
pub fn lambda_name_of(arn: &str) -> &str {
    arn.split(':').nth(6).unwrap_or("")
}

/// Document name: everything after the first `/` of
/// `arn:aws:ssm:<region>:<account>:document/<name>`.
pub fn ssm_name_of(arn: &str) -> &str {
    arn.split_once('/').map(|(_, name)| name).unwrap_or("")
}

pub fn ssm_document_arn(region: &str, account_id: &str, name: &str) -> String {
    format!("arn:aws:ssm:{}:{}:document/{}", region, account_id, name)
}

/// A parsed candidate: where it lives and what it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub arn: String,
    pub region: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Function,
    Document,
}

impl ResourceRef {
    /// Returns `None` when either the region or the name comes out empty.
    pub fn parse(arn: &str, kind: ResourceKind) -> Option<Self> {
        let region = region_of(arn);
        let name = match kind {
            ResourceKind::Function => lambda_name_of(arn),
            ResourceKind::Document => ssm_name_of(arn),
        };
        if region.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            arn: arn.to_string(),
            region: region.to_string(),
            name: name.to_string(),
        })
    }
}
