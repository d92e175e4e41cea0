use serde::{Deserialize, Serialize};

/// Temperature sent with every chat request
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Widget configuration.
///
/// The credential and chatbot id come from the build environment
/// (`CHATBASE_API_KEY` / `CHATBOT_ID`). Missing values never prevent the
/// UI from rendering — requests simply fail at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub api_key: String,
    pub chatbot_id: String,
    pub temperature: f32,
}

impl WidgetConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: option_env!("CHATBASE_API_KEY").unwrap_or("").to_string(),
            chatbot_id: option_env!("CHATBOT_ID").unwrap_or("").to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.chatbot_id.is_empty()
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            chatbot_id: String::new(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
