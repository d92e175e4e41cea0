use serde::{Deserialize, Serialize};

/// Events emitted by the async exchange pipeline.
/// The UI drains these each frame for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// The assistant reply was appended to the conversation
    ReplyReceived { conversation_id: String },

    /// The remote call failed; any optimistic user message was rolled back
    SendFailed {
        conversation_id: String,
        message: String,
    },
}
