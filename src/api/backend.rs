use async_trait::async_trait;

use crate::api::completion;
use crate::api::models::{self, ModelDescriptor};
use crate::core::error::ChatResult;
use crate::core::message::Message;
use crate::core::params::GenerationParams;
use crate::utils::url::normalize_base_url;

/// The two calls a chat session makes against a model server.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Chat-capable models, in server order.
    async fn list_models(&self) -> ChatResult<Vec<ModelDescriptor>>;

    async fn complete(
        &self,
        model: &str,
        transcript: &[Message],
        params: &GenerationParams,
    ) -> ChatResult<Message>;
}

/// [`ChatBackend`] speaking the OpenAI-compatible HTTP API.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn list_models(&self) -> ChatResult<Vec<ModelDescriptor>> {
        models::fetch_models(&self.client, &self.base_url).await
    }

    async fn complete(
        &self,
        model: &str,
        transcript: &[Message],
        params: &GenerationParams,
    ) -> ChatResult<Message> {
        completion::complete(&self.client, &self.base_url, model, transcript, params).await
    }
}
