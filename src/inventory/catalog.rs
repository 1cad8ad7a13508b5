//! Model catalog: one page of the foundation model listing at a time
//!
//! `ModelCatalog` is the seam between the inventory logic and the remote
//! service. `BedrockCatalog` implements it on top of `aws-sdk-bedrock`.

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use aws_sdk_bedrock::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrock::types::{FoundationModelSummary, ModelModality};
use serde::{Deserialize, Serialize};

/// Lifecycle block of a model summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelLifecycle {
    #[serde(default)]
    pub status: Option<String>,
}

/// A model summary as the service returns it
///
/// Everything except `model_id` may be absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub model_id: String,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub model_lifecycle: Option<ModelLifecycle>,
    #[serde(default)]
    pub input_modalities: Option<Vec<String>>,
    #[serde(default)]
    pub output_modalities: Option<Vec<String>>,
}

impl ModelSummary {
    /// Lifecycle status, `None` when either the block or the field is missing
    pub fn lifecycle_status(&self) -> Option<&str> {
        self.model_lifecycle
            .as_ref()
            .and_then(|lifecycle| lifecycle.status.as_deref())
    }
}

impl From<FoundationModelSummary> for ModelSummary {
    fn from(summary: FoundationModelSummary) -> Self {
        let modalities = |list: Option<Vec<ModelModality>>| -> Option<Vec<String>> {
            list.map(|items| items.iter().map(|m| m.as_str().to_string()).collect())
        };

        Self {
            model_id: summary.model_id,
            provider_name: summary.provider_name,
            model_lifecycle: summary.model_lifecycle.map(|lifecycle| ModelLifecycle {
                status: Some(lifecycle.status.as_str().to_string()),
            }),
            input_modalities: modalities(summary.input_modalities),
            output_modalities: modalities(summary.output_modalities),
        }
    }
}

/// One page of the listing protocol
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPage {
    #[serde(default)]
    pub model_summaries: Vec<ModelSummary>,
    /// Continuation token; `None` or empty ends the listing
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Source of foundation model pages
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// Fetch the page that `next_token` points at (`None` for the first page)
    async fn list_page(&self, next_token: Option<String>) -> AppResult<ModelPage>;
}

/// `ModelCatalog` backed by the Bedrock control plane
#[derive(Debug, Clone)]
pub struct BedrockCatalog {
    client: aws_sdk_bedrock::Client,
}

impl BedrockCatalog {
    pub fn new(client: aws_sdk_bedrock::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelCatalog for BedrockCatalog {
    async fn list_page(&self, next_token: Option<String>) -> AppResult<ModelPage> {
        // ListFoundationModels returns everything in a single response.
        if let Some(token) = next_token {
            tracing::debug!(next_token = %token, "Ignoring continuation token for single-page listing");
        }

        let output = self
            .client
            .list_foundation_models()
            .send()
            .await
            .map_err(classify_sdk_error)?;

        Ok(ModelPage {
            model_summaries: output
                .model_summaries
                .unwrap_or_default()
                .into_iter()
                .map(ModelSummary::from)
                .collect(),
            next_token: None,
        })
    }
}

/// Map an SDK failure onto the application's error classes
pub fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> AppError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            AppError::Network(DisplayErrorContext(&err).to_string())
        }
        SdkError::ServiceError(_) => AppError::from_service_code(
            err.code().unwrap_or("Unknown"),
            err.message().unwrap_or_default(),
        ),
        _ => AppError::Unknown(DisplayErrorContext(&err).to_string()),
    }
}
