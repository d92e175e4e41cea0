//! The conversation store — multi-conversation bookkeeping, derived
//! statistics, import/export, and synchronization with durable storage.
//!
//! The store is an explicitly constructed object injected into the
//! presentation layer; all mutation goes through its public operations.
//! Every mutation leaves stats consistent with the message sequence and
//! the selection resolvable, then persists before returning.

use std::collections::HashMap;
use std::rc::Rc;

use widget_types::conversation::Conversation;
use widget_types::export::{BulkExport, BulkExportEntry, ConversationExport, ExportedMessage};
use widget_types::message::Message;
use widget_types::{Result, WidgetError};

use crate::ports::StoragePort;
use crate::stats;

/// The distinguished, non-deletable conversation
pub const DEFAULT_CONVERSATION_ID: &str = "default";
pub const DEFAULT_CONVERSATION_NAME: &str = "General Chat";

/// Storage slot holding `{ [id]: Conversation }`
const CONVERSATIONS_KEY: &str = "conversations";
/// Storage slot holding the selected id as a bare string
const SELECTED_KEY: &str = "selectedConversation";

pub struct ConversationStore {
    conversations: HashMap<String, Conversation>,
    selected: String,
    storage: Rc<dyn StoragePort>,
}

impl ConversationStore {
    /// Initialize the store from persistent storage.
    ///
    /// Missing or corrupt state degrades to a fresh store; the default
    /// conversation is seeded whenever it is absent, and a stored selection
    /// that no longer resolves falls back to it.
    pub fn load(storage: Rc<dyn StoragePort>) -> Self {
        let mut conversations: HashMap<String, Conversation> = match storage.get(CONVERSATIONS_KEY)
        {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!("Discarding corrupt conversation state: {}", e);
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(e) => {
                log::warn!("Failed to read stored conversations: {}", e);
                HashMap::new()
            }
        };

        conversations
            .entry(DEFAULT_CONVERSATION_ID.to_string())
            .or_insert_with(|| {
                Conversation::new(
                    DEFAULT_CONVERSATION_ID.to_string(),
                    DEFAULT_CONVERSATION_NAME,
                )
            });

        let selected = match storage.get(SELECTED_KEY) {
            Ok(Some(id)) if conversations.contains_key(&id) => id,
            _ => DEFAULT_CONVERSATION_ID.to_string(),
        };

        log::info!(
            "Conversation store loaded: {} conversation(s), backend {}",
            conversations.len(),
            storage.backend_name()
        );

        Self {
            conversations,
            selected,
            storage,
        }
    }

    // ─── Queries ─────────────────────────────────────────────

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    pub fn selected_id(&self) -> &str {
        &self.selected
    }

    pub fn selected(&self) -> &Conversation {
        self.conversations
            .get(&self.selected)
            .or_else(|| self.conversations.get(DEFAULT_CONVERSATION_ID))
            .expect("store invariant: default conversation always present")
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// All conversations, pinned first, then by last activity descending.
    pub fn list(&self) -> Vec<&Conversation> {
        let mut all: Vec<&Conversation> = self.conversations.values().collect();
        sort_for_display(&mut all);
        all
    }

    /// Conversations whose name or tags contain the query
    /// (case-insensitive), restricted to archived or active entries.
    pub fn list_filtered(&self, query: &str, show_archived: bool) -> Vec<&Conversation> {
        let query = query.to_lowercase();
        let mut hits: Vec<&Conversation> = self
            .conversations
            .values()
            .filter(|c| {
                let matches = query.is_empty()
                    || c.name.to_lowercase().contains(&query)
                    || c.tags.iter().any(|t| t.to_lowercase().contains(&query));
                matches && c.archived == show_archived
            })
            .collect();
        sort_for_display(&mut hits);
        hits
    }

    // ─── Conversation lifecycle ──────────────────────────────

    /// Create an empty conversation and select it. Returns the fresh id.
    pub fn create(&mut self, name: &str) -> Result<String> {
        let id = fresh_id();
        self.conversations
            .insert(id.clone(), Conversation::new(id.clone(), name));
        self.selected = id.clone();
        self.persist_conversations()?;
        self.persist_selection()?;
        Ok(id)
    }

    pub fn rename(&mut self, id: &str, new_name: &str) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        conv.name = new_name.to_string();
        self.persist_conversations()
    }

    /// Remove a conversation. The default conversation is protected; if the
    /// removed conversation was selected, selection resets to the default.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if id == DEFAULT_CONVERSATION_ID {
            return Err(WidgetError::ProtectedConversation);
        }
        self.conversations
            .remove(id)
            .ok_or_else(|| WidgetError::UnknownConversation(id.to_string()))?;
        if self.selected == id {
            self.selected = DEFAULT_CONVERSATION_ID.to_string();
            self.persist_selection()?;
        }
        self.persist_conversations()
    }

    /// Set the selection if the id exists; unknown ids are a silent no-op.
    pub fn select(&mut self, id: &str) {
        if id != self.selected && self.conversations.contains_key(id) {
            self.selected = id.to_string();
            if let Err(e) = self.persist_selection() {
                log::error!("Failed to persist selection: {}", e);
            }
        }
    }

    // ─── Message operations ──────────────────────────────────

    pub fn append_message(&mut self, id: &str, message: Message) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        conv.messages.push(message);
        conv.stats = stats::compute(&conv.messages);
        self.persist_conversations()
    }

    /// Destructive rewind: truncate the sequence to and including the edited
    /// message, replace its content, and mark it edited. The caller is
    /// responsible for requesting a regenerated reply.
    pub fn edit_message(&mut self, id: &str, message_id: &str, new_content: &str) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        let index = conv
            .messages
            .iter()
            .position(|m| m.id == message_id)
            .ok_or_else(|| WidgetError::UnknownMessage(message_id.to_string()))?;
        conv.messages.truncate(index + 1);
        let message = &mut conv.messages[index];
        message.content = new_content.to_string();
        message.is_edited = true;
        conv.stats = stats::compute(&conv.messages);
        self.persist_conversations()
    }

    pub fn delete_message(&mut self, id: &str, message_id: &str) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        let index = conv
            .messages
            .iter()
            .position(|m| m.id == message_id)
            .ok_or_else(|| WidgetError::UnknownMessage(message_id.to_string()))?;
        conv.messages.remove(index);
        conv.stats = stats::compute(&conv.messages);
        self.persist_conversations()
    }

    // ─── Flags and tags ──────────────────────────────────────

    pub fn toggle_pinned(&mut self, id: &str) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        conv.pinned = !conv.pinned;
        self.persist_conversations()
    }

    pub fn toggle_archived(&mut self, id: &str) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        conv.archived = !conv.archived;
        self.persist_conversations()
    }

    /// Set semantics: adding a tag that is already present is a no-op.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        if conv.tags.iter().any(|t| t == tag) {
            return Ok(());
        }
        conv.tags.push(tag.to_string());
        self.persist_conversations()
    }

    /// Set semantics: removing an absent tag is a no-op.
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> Result<()> {
        let conv = self.conversation_mut(id)?;
        let before = conv.tags.len();
        conv.tags.retain(|t| t != tag);
        if conv.tags.len() == before {
            return Ok(());
        }
        self.persist_conversations()
    }

    // ─── Import / export ─────────────────────────────────────

    /// Import an exported conversation document under a fresh id.
    ///
    /// The document must carry a string `name` and a `messages` sequence of
    /// `{role, content, timestamp}` objects; `tags` is optional. Imported
    /// role/content/timestamp fields are preserved verbatim; message ids are
    /// newly assigned (the export format carries none) and stats are
    /// recomputed immediately.
    pub fn import(&mut self, json: &str) -> Result<String> {
        let doc: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| WidgetError::Validation(format!("not valid JSON: {}", e)))?;

        let name = doc
            .get("name")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| WidgetError::Validation("`name` must be a string".to_string()))?;
        let raw_messages = doc
            .get("messages")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| WidgetError::Validation("`messages` must be an array".to_string()))?;

        let imported: Vec<ExportedMessage> = raw_messages
            .iter()
            .map(|v| {
                serde_json::from_value(v.clone())
                    .map_err(|e| WidgetError::Validation(format!("malformed message entry: {}", e)))
            })
            .collect::<Result<_>>()?;

        let mut tags: Vec<String> = Vec::new();
        if let Some(raw_tags) = doc.get("tags").and_then(serde_json::Value::as_array) {
            for tag in raw_tags.iter().filter_map(serde_json::Value::as_str) {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.to_string());
                }
            }
        }

        let id = fresh_id();
        let mut conv = Conversation::new(id.clone(), name);
        conv.tags = tags;
        conv.messages = imported
            .into_iter()
            .map(|m| Message::with_timestamp(m.role, m.content, m.timestamp))
            .collect();
        conv.stats = stats::compute(&conv.messages);

        self.conversations.insert(id.clone(), conv);
        self.persist_conversations()?;
        Ok(id)
    }

    /// Export one conversation; refused when it has no messages.
    pub fn export(&self, id: &str) -> Result<ConversationExport> {
        let conv = self
            .conversations
            .get(id)
            .ok_or_else(|| WidgetError::UnknownConversation(id.to_string()))?;
        if conv.messages.is_empty() {
            return Err(WidgetError::EmptyConversation);
        }
        Ok(ConversationExport::new(conv.name.clone(), &conv.messages))
    }

    /// Export several conversations into one document. No emptiness check.
    pub fn bulk_export(&self, ids: &[String]) -> Result<BulkExport> {
        let entries = ids
            .iter()
            .map(|id| {
                let conv = self
                    .conversations
                    .get(id)
                    .ok_or_else(|| WidgetError::UnknownConversation(id.to_string()))?;
                Ok(BulkExportEntry {
                    name: conv.name.clone(),
                    messages: conv.messages.clone(),
                    tags: conv.tags.clone(),
                    stats: conv.stats.clone(),
                })
            })
            .collect::<Result<_>>()?;
        Ok(BulkExport::new(entries))
    }

    /// Remove all listed conversations. Refuses the whole batch when the
    /// default conversation is listed; unknown ids are ignored. Returns the
    /// number removed.
    pub fn bulk_delete(&mut self, ids: &[String]) -> Result<usize> {
        if ids.iter().any(|id| id == DEFAULT_CONVERSATION_ID) {
            return Err(WidgetError::ProtectedConversation);
        }
        let mut removed = 0;
        for id in ids {
            if self.conversations.remove(id).is_some() {
                removed += 1;
            }
        }
        if ids.iter().any(|id| *id == self.selected) {
            self.selected = DEFAULT_CONVERSATION_ID.to_string();
            self.persist_selection()?;
        }
        self.persist_conversations()?;
        Ok(removed)
    }

    // ─── Persistence ─────────────────────────────────────────

    fn persist_conversations(&self) -> Result<()> {
        let json = serde_json::to_string(&self.conversations)?;
        self.storage.set(CONVERSATIONS_KEY, &json)
    }

    fn persist_selection(&self) -> Result<()> {
        self.storage.set(SELECTED_KEY, &self.selected)
    }

    fn conversation_mut(&mut self, id: &str) -> Result<&mut Conversation> {
        self.conversations
            .get_mut(id)
            .ok_or_else(|| WidgetError::UnknownConversation(id.to_string()))
    }
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn sort_for_display(conversations: &mut [&Conversation]) {
    conversations.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| {
                b.last_activity()
                    .unwrap_or("")
                    .cmp(a.last_activity().unwrap_or(""))
            })
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}
