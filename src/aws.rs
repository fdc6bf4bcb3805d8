use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_lambda::types::Runtime;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::{DocumentFormat, DocumentKeyValuesFilter};
use aws_smithy_runtime_api::client::result::SdkError;
use tracing::debug;

use crate::client::{ClientError, CloudClient, DocumentFilter};
use crate::RuntimeFilter;

/// [`CloudClient`] backed by the AWS SDK. Regional clients are derived
/// from one shared `SdkConfig` with the region overridden per call.
pub struct AwsClient {
    config: SdkConfig,
}

impl AwsClient {
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(config)
    }

    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }

    fn lambda(&self, region: &str) -> aws_sdk_lambda::Client {
        let conf = aws_sdk_lambda::config::Builder::from(&self.config)
            .region(aws_sdk_lambda::config::Region::new(region.to_string()))
            .build();
        aws_sdk_lambda::Client::from_conf(conf)
    }

    fn ssm(&self, region: &str) -> aws_sdk_ssm::Client {
        let conf = aws_sdk_ssm::config::Builder::from(&self.config)
            .region(aws_sdk_ssm::config::Region::new(region.to_string()))
            .build();
        aws_sdk_ssm::Client::from_conf(conf)
    }
}

fn sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ClientError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let unavailable = matches!(
        err,
        SdkError::ConstructionFailure(_) | SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    );
    let message = DisplayErrorContext(err).to_string();
    if unavailable {
        ClientError::Unavailable(format!("{}: {}", operation, message))
    } else {
        ClientError::Service { operation, message }
    }
}

#[async_trait]
impl CloudClient for AwsClient {
    async fn account_id(&self) -> Result<String, ClientError> {
        let output = aws_sdk_sts::Client::new(&self.config)
            .get_caller_identity()
            .send().await
            .map_err(|e| sdk_error("GetCallerIdentity", e))?;
        output.account
            .ok_or(ClientError::MissingField { operation: "GetCallerIdentity", field: "Account" })
    }

    async fn list_functions(&self, region: &str, filter: &RuntimeFilter) -> Result<Vec<String>, ClientError> {
        debug!("listing functions in {} matching {}", region, filter.query_expression());
        let mut pages = self.lambda(region)
            .list_functions()
            .into_paginator()
            .items()
            .send();

        let mut arns = Vec::new();
        while let Some(function) = pages.next().await {
            let function = function.map_err(|e| sdk_error("ListFunctions", e))?;
            let outdated = function.runtime().is_some_and(|rt| filter.matches(rt.as_str()));
            if let (true, Some(arn)) = (outdated, function.function_arn()) {
                arns.push(arn.to_string());
            }
        }
        Ok(arns)
    }

    async fn list_documents(&self, region: &str, filter: &DocumentFilter) -> Result<Vec<String>, ClientError> {
        let mut pages = self.ssm(region)
            .list_documents()
            .filters(DocumentKeyValuesFilter::builder()
                .key("Owner")
                .values(&filter.owner)
                .build()
            )
            .filters(DocumentKeyValuesFilter::builder()
                .key("DocumentType")
                .values(&filter.document_type)
                .build()
            )
            .into_paginator()
            .items()
            .send();

        let mut names = Vec::new();
        while let Some(document) = pages.next().await {
            let document = document.map_err(|e| sdk_error("ListDocuments", e))?;
            if let Some(name) = document.name {
                names.push(name);
            }
        }
        Ok(names)
    }

    async fn get_document(&self, region: &str, name: &str) -> Result<String, ClientError> {
        let output = self.ssm(region)
            .get_document()
            .name(name)
            .document_format(DocumentFormat::Json)
            .send().await
            .map_err(|e| sdk_error("GetDocument", e))?;
        output.content
            .ok_or(ClientError::MissingField { operation: "GetDocument", field: "Content" })
    }

    async fn update_function_runtime(&self, region: &str, name: &str, runtime: &str) -> Result<(), ClientError> {
        self.lambda(region)
            .update_function_configuration()
            .function_name(name)
            .runtime(Runtime::from(runtime))
            .send().await
            .map_err(|e| sdk_error("UpdateFunctionConfiguration", e))?;
        Ok(())
    }

    async fn update_document(&self, region: &str, name: &str, content: &str) -> Result<String, ClientError> {
        let output = self.ssm(region)
            .update_document()
            .name(name)
            .content(content)
            .document_format(DocumentFormat::Json)
            .document_version("$LATEST")
            .send().await
            .map_err(|e| sdk_error("UpdateDocument", e))?;
        output.document_description
            .and_then(|d| d.document_version)
            .ok_or(ClientError::MissingField { operation: "UpdateDocument", field: "DocumentVersion" })
    }
}
