//! Export document formats for the conversation import/export feature.

use serde::{Deserialize, Serialize};
use crate::conversation::ConversationStats;
use crate::message::{Message, Role};

/// A message as it appears in an export document — ids and edit flags
/// are stripped, only the conversational content survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedMessage {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
}

impl From<&Message> for ExportedMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
            timestamp: msg.timestamp.clone(),
        }
    }
}

/// Single-conversation export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationExport {
    pub name: String,
    #[serde(rename = "exportDate")]
    pub export_date: String,
    pub messages: Vec<ExportedMessage>,
}

impl ConversationExport {
    pub fn new(name: impl Into<String>, messages: &[Message]) -> Self {
        Self {
            name: name.into(),
            export_date: chrono::Utc::now().to_rfc3339(),
            messages: messages.iter().map(ExportedMessage::from).collect(),
        }
    }

    /// Suggested download file name: sanitized conversation name plus the
    /// export date, e.g. `trip_planning_2026-08-06.json`
    pub fn file_name(&self) -> String {
        let slug: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_{}.json", slug, date_part(&self.export_date))
    }
}

/// Multi-conversation export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkExport {
    #[serde(rename = "exportDate")]
    pub export_date: String,
    pub conversations: Vec<BulkExportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkExportEntry {
    pub name: String,
    pub messages: Vec<Message>,
    pub tags: Vec<String>,
    pub stats: ConversationStats,
}

impl BulkExport {
    pub fn new(conversations: Vec<BulkExportEntry>) -> Self {
        Self {
            export_date: chrono::Utc::now().to_rfc3339(),
            conversations,
        }
    }

    pub fn file_name(&self) -> String {
        format!("conversations_export_{}.json", date_part(&self.export_date))
    }
}

fn date_part(rfc3339: &str) -> &str {
    rfc3339.get(..10).unwrap_or(rfc3339)
}
