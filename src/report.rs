//! Reporting of the model inventory as log lines

use crate::error::AppResult;
use crate::inventory::EnabledModel;
use std::future::Future;

/// Width of the separator printed after each model
pub const SEPARATOR_WIDTH: usize = 50;

/// The lines logged for one model, in order
pub fn model_lines(model: &EnabledModel) -> [String; 5] {
    [
        format!("Model ID: {}", model.model_id),
        format!("Provider: {}", model.provider),
        format!("Input Modalities: {}", model.input_modalities.join(", ")),
        format!("Output Modalities: {}", model.output_modalities.join(", ")),
        "-".repeat(SEPARATOR_WIDTH),
    ]
}

/// Log the model count followed by one block per model
pub fn log_models(models: &[EnabledModel]) {
    tracing::info!(count = models.len(), "Found {} enabled models:", models.len());
    for model in models {
        for line in model_lines(model) {
            tracing::info!(model_id = %model.model_id, "{}", line);
        }
    }
}

/// Run an inventory and report its outcome
///
/// The start message is logged before `inventory` is first polled. Errors are
/// logged and handed back unchanged.
pub async fn run<F>(inventory: F) -> AppResult<Vec<EnabledModel>>
where
    F: Future<Output = AppResult<Vec<EnabledModel>>>,
{
    tracing::info!("Starting to fetch enabled Bedrock models...");

    match inventory.await {
        Ok(models) => {
            log_models(&models);
            Ok(models)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list models: {}", e);
            Err(e)
        }
    }
}
