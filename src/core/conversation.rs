//! Conversation list and transcript management
//!
//! The store keeps conversations most-recent-first, tracks which one is
//! active, and mirrors every mutation to the [`KeyValueStore`] it was built
//! with.

use crate::core::error::{ChatError, ChatResult};
use crate::core::message::Message;
use crate::core::storage::{
    self, KeyValueStore, SharedStore, ACTIVE_CONVERSATION_KEY, CONVERSATIONS_KEY,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_TITLE: &str = "New Chat";
pub const TITLE_MAX_CHARS: usize = 30;
const TITLE_ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    /// No messages yet; the title is still the default.
    Empty,
    /// Holds its first message; the title has been derived from it.
    Titled,
    /// Further messages arrived; the title is frozen.
    Active,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: default_title(),
            messages: Vec::new(),
        }
    }

    pub fn phase(&self) -> ConversationPhase {
        match self.messages.len() {
            0 => ConversationPhase::Empty,
            1 => ConversationPhase::Titled,
            _ => ConversationPhase::Active,
        }
    }

    fn accepts_title(&self) -> bool {
        self.phase() != ConversationPhase::Active && self.title == DEFAULT_TITLE
    }
}

/// Title shown for a conversation whose first message is `source`.
///
/// Counts grapheme clusters so truncation never splits a user-perceived
/// character.
pub fn derive_title(source: &str) -> String {
    let mut graphemes = source.graphemes(true);
    let head: String = graphemes.by_ref().take(TITLE_MAX_CHARS).collect();
    if graphemes.next().is_some() {
        format!("{head}{TITLE_ELLIPSIS}")
    } else {
        head
    }
}

/// Millisecond-timestamp ids that never repeat within one store, even when
/// several conversations are created inside the same millisecond.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            self.last = self.last.max(value);
        }
    }

    /// Restarts from the clock when the observed maximum cannot be
    /// incremented; callers still check the result against existing ids.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = match self.last.checked_add(1) {
            Some(next) => next.max(now),
            None => now,
        };
        self.last.to_string()
    }
}

pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    ids: IdGenerator,
    store: SharedStore,
}

impl ConversationStore {
    /// An empty store that writes through to `store` without reading it.
    pub fn new(store: SharedStore) -> Self {
        Self {
            conversations: Vec::new(),
            active_id: None,
            ids: IdGenerator::default(),
            store,
        }
    }

    /// Restore conversations and the active id from `store`.
    ///
    /// A corrupt conversation list is logged and replaced by an empty one.
    /// The persisted active id is honored only when it names a loaded
    /// conversation; otherwise the first conversation becomes active.
    pub fn load(store: SharedStore) -> Self {
        let conversations = load_conversations(store.as_ref());

        let persisted_active = store
            .load(ACTIVE_CONVERSATION_KEY)
            .filter(|id| conversations.iter().any(|c| &c.id == id));
        let active_id = persisted_active.or_else(|| conversations.first().map(|c| c.id.clone()));

        let mut ids = IdGenerator::default();
        for conversation in &conversations {
            ids.observe(&conversation.id);
        }

        Self {
            conversations,
            active_id,
            ids,
            store,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Messages of the active conversation, empty when none is active.
    pub fn transcript(&self) -> &[Message] {
        self.active().map(|c| c.messages.as_slice()).unwrap_or(&[])
    }

    pub fn create_conversation(&mut self) -> &Conversation {
        let mut id = self.ids.next_id();
        while self.get(&id).is_some() {
            id = self.ids.next_id();
        }

        self.conversations.insert(0, Conversation::new(id.clone()));
        self.active_id = Some(id);
        self.persist_conversations();
        self.persist_active();
        &self.conversations[0]
    }

    /// Make `id` the active conversation.
    ///
    /// An unknown id is reported as [`ChatError::NotFound`] and leaves the
    /// current selection untouched.
    pub fn select_conversation(&mut self, id: &str) -> ChatResult<&Conversation> {
        let index = self.position(id)?;
        self.active_id = Some(id.to_string());
        self.persist_active();
        Ok(&self.conversations[index])
    }

    /// Append `message` and return the updated transcript.
    pub fn append_message(&mut self, id: &str, message: Message) -> ChatResult<&[Message]> {
        let index = self.position(id)?;
        self.conversations[index].messages.push(message);
        self.persist_conversations();
        Ok(&self.conversations[index].messages)
    }

    /// Derive the title from `source_text` while the conversation holds at
    /// most its first message. Returns whether the title changed.
    pub fn retitle(&mut self, id: &str, source_text: &str) -> ChatResult<bool> {
        let index = self.position(id)?;
        let conversation = &mut self.conversations[index];
        if !conversation.accepts_title() {
            return Ok(false);
        }

        let title = derive_title(source_text);
        if title == conversation.title {
            return Ok(false);
        }
        conversation.title = title;
        self.persist_conversations();
        Ok(true)
    }

    /// Remove a conversation. When it was active, the first remaining
    /// conversation (if any) becomes active.
    pub fn delete_conversation(&mut self, id: &str) -> ChatResult<Conversation> {
        let index = self.position(id)?;
        let removed = self.conversations.remove(index);

        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.conversations.first().map(|c| c.id.clone());
        }
        self.persist_conversations();
        self.persist_active();
        Ok(removed)
    }

    fn position(&self, id: &str) -> ChatResult<usize> {
        self.conversations
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ChatError::NotFound(id.to_string()))
    }

    fn persist_conversations(&self) {
        match serde_json::to_string(&self.conversations) {
            Ok(json) => storage::save_or_warn(self.store.as_ref(), CONVERSATIONS_KEY, &json),
            Err(err) => warn!(error = %err, "failed to encode conversations"),
        }
    }

    fn persist_active(&self) {
        let value = self.active_id.as_deref().unwrap_or_default();
        storage::save_or_warn(self.store.as_ref(), ACTIVE_CONVERSATION_KEY, value);
    }
}

/// Decode the persisted conversation list, dropping duplicate ids.
fn load_conversations(store: &dyn KeyValueStore) -> Vec<Conversation> {
    let conversations: Vec<Conversation> = match storage::load_json(store, CONVERSATIONS_KEY) {
        Ok(Some(list)) => list,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(error = %err, "discarding unreadable conversation list");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    conversations
        .into_iter()
        .filter(|conversation| {
            let fresh = seen.insert(conversation.id.clone());
            if !fresh {
                warn!(id = %conversation.id, "dropping duplicate conversation id");
            }
            fresh
        })
        .collect()
}
