use crate::api::{ModelInfo, ModelsResponse};
use crate::core::error::{ChatError, ChatResult};
use crate::utils::url::api_url;
use tracing::debug;

/// Model ids containing this marker are embedding models and cannot chat.
pub const EMBEDDING_MARKER: &str = "embed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: String,
}

impl From<ModelInfo> for ModelDescriptor {
    fn from(info: ModelInfo) -> Self {
        Self { id: info.id }
    }
}

pub fn is_chat_model(id: &str) -> bool {
    !id.contains(EMBEDDING_MARKER)
}

/// Drop embedding models, keeping server order.
pub fn filter_chat_models(models: Vec<ModelInfo>) -> Vec<ModelDescriptor> {
    models
        .into_iter()
        .filter(|model| is_chat_model(&model.id))
        .map(ModelDescriptor::from)
        .collect()
}

/// The model to use after a refresh: the current selection when there is one,
/// otherwise the first listed model.
pub fn pick_default_model(current: Option<&str>, models: &[ModelDescriptor]) -> Option<String> {
    match current {
        Some(model) => Some(model.to_string()),
        None => models.first().map(|m| m.id.clone()),
    }
}

pub async fn fetch_models(
    client: &reqwest::Client,
    base_url: &str,
) -> ChatResult<Vec<ModelDescriptor>> {
    let models_url = api_url(base_url, "models");
    debug!(url = %models_url, "fetching model list");

    let response = client
        .get(models_url)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|err| ChatError::Connection(err.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(ChatError::Http { status, body });
    }

    let models_response = response.json::<ModelsResponse>().await?;
    let models = filter_chat_models(models_response.data);
    debug!(count = models.len(), "model list received");
    Ok(models)
}
