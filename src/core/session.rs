//! Chat session orchestration
//!
//! [`ChatSession`] owns the conversation store, the generation parameters and
//! the selected model, and drives one completion request at a time. Failures
//! never escape it: they land in a single dismissible error banner.

use crate::api::backend::ChatBackend;
use crate::api::models::{pick_default_model, ModelDescriptor};
use crate::core::conversation::{Conversation, ConversationStore};
use crate::core::error::{ChatError, ChatResult};
use crate::core::message::Message;
use crate::core::params::GenerationParams;
use crate::core::theme::{ThemeMode, UiState};
use std::sync::Arc;
use tracing::{debug, warn};

pub const SELECT_MODEL_FIRST: &str = "Please select a model first";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingModelList,
    Ready,
    SendingRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input or a request already in flight; nothing happened.
    Ignored,
    /// Validation failed before anything was appended.
    Rejected,
    /// The assistant reply was appended.
    Replied(Message),
    /// The user message was kept but the request failed.
    Failed,
}

pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    conversations: ConversationStore,
    ui: UiState,
    params: GenerationParams,
    models: Vec<ModelDescriptor>,
    selected_model: Option<String>,
    phase: SessionPhase,
    error: Option<String>,
}

impl ChatSession {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        conversations: ConversationStore,
        ui: UiState,
        params: GenerationParams,
    ) -> Self {
        Self {
            backend,
            conversations,
            ui,
            params,
            models: Vec::new(),
            selected_model: None,
            phase: SessionPhase::Idle,
            error: None,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.selected_model = model.filter(|m| !m.trim().is_empty());
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == SessionPhase::SendingRequest
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    pub fn transcript(&self) -> &[Message] {
        self.conversations.transcript()
    }

    pub fn theme(&self) -> ThemeMode {
        self.ui.theme()
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.ui.toggle_theme()
    }

    pub fn set_temperature(&mut self, value: f32) -> f32 {
        self.params.set_temperature(value)
    }

    pub fn set_max_tokens(&mut self, value: u32) -> u32 {
        self.params.set_max_tokens(value)
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.params.set_system_prompt(prompt);
    }

    /// Select a model. Once a model list is known, ids outside it are
    /// rejected.
    pub fn set_model(&mut self, id: &str) -> ChatResult<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ChatError::Validation("Model id cannot be empty".to_string()));
        }
        if !self.models.is_empty() && !self.models.iter().any(|m| m.id == id) {
            return Err(ChatError::Validation(format!("Unknown model: {id}")));
        }
        self.selected_model = Some(id.to_string());
        Ok(())
    }

    /// Fetch the model list. The first listed model is selected when none is.
    pub async fn refresh_models(&mut self) -> &[ModelDescriptor] {
        let resume = self.phase;
        self.phase = SessionPhase::AwaitingModelList;
        self.error = None;

        match self.backend.list_models().await {
            Ok(models) => {
                self.selected_model = pick_default_model(self.selected_model.as_deref(), &models);
                debug!(count = models.len(), selected = ?self.selected_model, "models refreshed");
                self.models = models;
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch models");
                self.error = Some(format!("Could not connect to CodeFace API: {err}"));
            }
        }

        self.phase = match resume {
            SessionPhase::Idle => SessionPhase::Ready,
            other => other,
        };
        &self.models
    }

    /// Whether the send control is enabled for `input`.
    pub fn can_send(&self, input: &str) -> bool {
        !self.is_waiting() && !input.trim().is_empty()
    }

    /// Send `input` as a user message and wait for the reply.
    ///
    /// The user message is appended and persisted before the request goes
    /// out and stays in the transcript even when the request fails.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        if !self.can_send(input) {
            return SubmitOutcome::Ignored;
        }
        self.error = None;

        let Some(model) = self.selected_model.clone() else {
            self.error = Some(ChatError::Validation(SELECT_MODEL_FIRST.to_string()).to_string());
            return SubmitOutcome::Rejected;
        };

        let conversation_id = match self.conversations.active_id() {
            Some(id) => id.to_string(),
            None => self.conversations.create_conversation().id.clone(),
        };

        let content = input.trim().to_string();
        let transcript = match self
            .conversations
            .append_message(&conversation_id, Message::user(content.clone()))
        {
            Ok(transcript) => transcript.to_vec(),
            Err(err) => {
                self.error = Some(format!("Error: {err}"));
                return SubmitOutcome::Failed;
            }
        };
        if transcript.len() == 1 {
            if let Err(err) = self.conversations.retitle(&conversation_id, &content) {
                warn!(error = %err, "failed to retitle conversation");
            }
        }

        let resume = self.phase;
        self.phase = SessionPhase::SendingRequest;
        let result = self.backend.complete(&model, &transcript, &self.params).await;
        self.phase = resume;

        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, conversation = %conversation_id, "completion failed");
                self.error = Some(format!("Error: {err}"));
                return SubmitOutcome::Failed;
            }
        };

        match self
            .conversations
            .append_message(&conversation_id, reply.clone())
        {
            Ok(_) => SubmitOutcome::Replied(reply),
            Err(err) => {
                self.error = Some(format!("Error: {err}"));
                SubmitOutcome::Failed
            }
        }
    }

    pub fn new_conversation(&mut self) -> &Conversation {
        self.error = None;
        self.conversations.create_conversation()
    }

    /// Switch conversations. Unknown ids keep the current selection and set
    /// the error banner.
    pub fn select_conversation(&mut self, id: &str) -> ChatResult<()> {
        self.error = None;
        match self.conversations.select_conversation(id) {
            Ok(_) => Ok(()),
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn delete_conversation(&mut self, id: &str) -> ChatResult<Conversation> {
        self.error = None;
        self.conversations.delete_conversation(id)
    }
}
