//! UI-level state that drives rendering.
//!
//! Holds input drafts, the search query, bulk selection, and transient
//! notices. Async send outcomes arrive as events drained from the
//! EventBus each frame.

use std::collections::HashSet;
use widget_types::event::WidgetEvent;

/// Seconds a notice stays on screen
pub const NOTICE_TTL_SECS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient user-facing notice
#[derive(Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub raised_at: f64,
}

/// In-progress edit of a user message
#[derive(Clone)]
pub struct EditDraft {
    pub message_id: String,
    pub text: String,
}

pub struct UiState {
    /// Message input field content
    pub input_text: String,
    /// Fuzzy search query over the active conversation's messages
    pub search_query: String,
    /// A send is outstanding; input is disabled and the typing
    /// indicator is shown
    pub is_sending: bool,
    pub editing: Option<EditDraft>,
    /// Whether the conversation manager side panel is open
    pub show_manager: bool,
    /// Conversation list filter (name/tags)
    pub conversation_query: String,
    pub show_archived: bool,
    pub new_name_draft: String,
    /// Conversation id currently being renamed
    pub renaming: Option<String>,
    pub rename_draft: String,
    /// Conversation id whose tags are being edited
    pub tagging: Option<String>,
    pub tag_draft: String,
    /// Bulk-selected conversation ids
    pub checked: HashSet<String>,
    pub show_import: bool,
    pub import_draft: String,
    pub notices: Vec<Notice>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            search_query: String::new(),
            is_sending: false,
            editing: None,
            show_manager: false,
            conversation_query: String::new(),
            show_archived: false,
            new_name_draft: String::new(),
            renaming: None,
            rename_draft: String::new(),
            tagging: None,
            tag_draft: String::new(),
            checked: HashSet::new(),
            show_import: false,
            import_draft: String::new(),
            notices: Vec::new(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<WidgetEvent>, now: f64) {
        for event in events {
            match event {
                WidgetEvent::ReplyReceived { .. } => {
                    self.is_sending = false;
                }
                WidgetEvent::SendFailed { message, .. } => {
                    self.is_sending = false;
                    self.push_notice(
                        NoticeLevel::Error,
                        format!("Failed to get a response: {}", message),
                        now,
                    );
                }
            }
        }
    }

    pub fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>, now: f64) {
        self.notices.push(Notice {
            level,
            text: text.into(),
            raised_at: now,
        });
    }

    /// Drop notices older than their time-to-live. Called each frame.
    pub fn prune_notices(&mut self, now: f64) {
        self.notices
            .retain(|n| now - n.raised_at < NOTICE_TTL_SECS);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a millisecond duration for the stats display, e.g. "3s", "1m 12s"
pub fn format_duration(ms: f64) -> String {
    if ms <= 0.0 {
        return "0s".to_string();
    }
    let seconds = (ms / 1000.0).floor() as u64;
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    format!("{}m {}s", seconds / 60, seconds % 60)
}
