use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum WidgetError {
    #[error("Invalid data: {0}")]
    Validation(String),

    #[error("Unknown conversation: {0}")]
    UnknownConversation(String),

    #[error("Unknown message: {0}")]
    UnknownMessage(String),

    #[error("The default conversation cannot be deleted")]
    ProtectedConversation,

    #[error("No messages to export")]
    EmptyConversation,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Chat service error: {0}")]
    Remote(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl From<serde_json::Error> for WidgetError {
    fn from(e: serde_json::Error) -> Self {
        WidgetError::Serialization(e.to_string())
    }
}
