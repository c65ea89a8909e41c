use crate::api::backend::ChatBackend;
use crate::api::models::ModelDescriptor;
use crate::core::conversation::ConversationStore;
use crate::core::error::ChatResult;
use crate::core::message::Message;
use crate::core::params::GenerationParams;
use crate::core::session::ChatSession;
use crate::core::storage::{MemoryStore, SharedStore};
use crate::core::theme::UiState;
use async_trait::async_trait;
use std::sync::Arc;

/// Backend that lists fixed models and echoes the last user message.
pub struct EchoBackend {
    models: Vec<String>,
}

impl EchoBackend {
    pub fn new(models: &[&str]) -> Self {
        Self {
            models: models.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ChatBackend for EchoBackend {
    async fn list_models(&self) -> ChatResult<Vec<ModelDescriptor>> {
        Ok(self
            .models
            .iter()
            .map(|id| ModelDescriptor { id: id.clone() })
            .collect())
    }

    async fn complete(
        &self,
        _model: &str,
        transcript: &[Message],
        _params: &GenerationParams,
    ) -> ChatResult<Message> {
        let last = transcript
            .iter()
            .rev()
            .find(|message| message.is_user())
            .map(|message| message.content.as_str())
            .unwrap_or_default();
        Ok(Message::assistant(format!("echo: {last}")))
    }
}

pub fn create_test_session() -> ChatSession {
    create_test_session_with_store(MemoryStore::shared())
}

pub fn create_test_session_with_store(store: SharedStore) -> ChatSession {
    ChatSession::new(
        Arc::new(EchoBackend::new(&["test-model", "other-model"])),
        ConversationStore::load(store.clone()),
        UiState::load(store),
        GenerationParams::default(),
    )
}

/// Build a session holding conversations with the given first messages,
/// created oldest first so the last entry ends up at the top of the list.
pub async fn create_session_with_conversations(first_messages: &[&str]) -> ChatSession {
    let mut session = create_test_session();
    session.refresh_models().await;
    for text in first_messages {
        session.new_conversation();
        session.submit(text).await;
    }
    session
}
