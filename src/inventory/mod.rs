//! Foundation model inventory
//!
//! Walks every page of the model listing, keeps the models whose lifecycle
//! status is exactly `ACTIVE`, and normalizes them into `EnabledModel`.

pub mod catalog;
pub mod pages;

pub use catalog::{BedrockCatalog, ModelCatalog, ModelLifecycle, ModelPage, ModelSummary};
pub use pages::ModelPages;

use crate::client::{ClientConfig, build_client};
use crate::connectivity::ConnectivityCheck;
use crate::error::{AppError, AppResult};
use serde::Serialize;

/// Lifecycle status a model must carry to be reported
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Normalized record for one active foundation model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnabledModel {
    pub model_id: String,
    pub provider: String,
    pub input_modalities: Vec<String>,
    pub output_modalities: Vec<String>,
}

impl EnabledModel {
    /// Project an active summary; `None` for anything that is not `ACTIVE`
    ///
    /// # Errors
    ///
    /// An active summary without a provider name is malformed.
    pub fn from_summary(summary: ModelSummary) -> AppResult<Option<Self>> {
        if summary.lifecycle_status() != Some(ACTIVE_STATUS) {
            return Ok(None);
        }

        let provider = summary.provider_name.ok_or_else(|| {
            AppError::Unknown(format!(
                "model summary '{}' is missing providerName",
                summary.model_id
            ))
        })?;

        Ok(Some(Self {
            model_id: summary.model_id,
            provider,
            input_modalities: summary.input_modalities.unwrap_or_default(),
            output_modalities: summary.output_modalities.unwrap_or_default(),
        }))
    }
}

/// List every active model the catalog exposes, in listing order
///
/// Either the complete list is returned or the first error; failures are
/// logged here with their service code and message when present.
pub async fn list_enabled_models(catalog: &dyn ModelCatalog) -> AppResult<Vec<EnabledModel>> {
    match collect_enabled(catalog).await {
        Ok(models) => Ok(models),
        Err(err) => {
            match &err {
                AppError::Service { code, message } | AppError::Auth { code, message } => {
                    tracing::error!(
                        code = %code,
                        error_message = %message,
                        retryable = err.is_retryable(),
                        "AWS Error: {} - {}",
                        code,
                        message
                    );
                }
                other => {
                    tracing::error!(
                        error = %other,
                        retryable = other.is_retryable(),
                        "Unexpected error: {}",
                        other
                    );
                }
            }
            Err(err)
        }
    }
}

async fn collect_enabled(catalog: &dyn ModelCatalog) -> AppResult<Vec<EnabledModel>> {
    let mut pages = ModelPages::new(catalog);
    let mut enabled = Vec::new();
    let mut page_count = 0usize;

    while let Some(page) = pages.next_page().await {
        let page = page?;
        page_count += 1;
        tracing::debug!(
            page = page_count,
            summaries = page.model_summaries.len(),
            "Received model listing page"
        );

        for summary in page.model_summaries {
            if let Some(model) = EnabledModel::from_summary(summary)? {
                enabled.push(model);
            }
        }
    }

    Ok(enabled)
}

/// Build a Bedrock client and list its active foundation models
pub async fn list_foundation_models(
    config: &ClientConfig,
    connectivity: &ConnectivityCheck<'_>,
) -> AppResult<Vec<EnabledModel>> {
    let client = build_client(config, connectivity).await?;
    let catalog = BedrockCatalog::new(client);
    list_enabled_models(&catalog).await
}
