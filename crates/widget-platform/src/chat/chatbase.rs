//! Hosted chatbot adapter.
//!
//! One fixed endpoint, one request/response round trip per outgoing
//! message. Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use widget_core::ports::ChatPort;
use widget_types::config::WidgetConfig;
use widget_types::message::Message;
use widget_types::{Result, WidgetError};

/// The hosted chatbot endpoint
pub const CHAT_ENDPOINT: &str = "https://www.chatbase.co/api/v1/chat";

pub struct ChatbaseClient {
    config: WidgetConfig,
}

impl ChatbaseClient {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl ChatPort for ChatbaseClient {
    async fn send(&self, history: &[Message], new_message: &Message) -> Result<String> {
        let body = chat_request_body(history, new_message, &self.config);

        let response = Request::post(CHAT_ENDPOINT)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| WidgetError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(WidgetError::Remote(format!("HTTP {}: {}", status, text)));
        }

        let data: ChatReply = response
            .json()
            .await
            .map_err(|e| WidgetError::Remote(e.to_string()))?;

        Ok(data.text)
    }
}

/// Build the wire request body: the full prior history plus the new
/// message, reduced to role+content pairs (ids and timestamps stripped).
pub fn chat_request_body(
    history: &[Message],
    new_message: &Message,
    config: &WidgetConfig,
) -> Value {
    let messages: Vec<Value> = history
        .iter()
        .chain(std::iter::once(new_message))
        .map(|m| {
            json!({
                "role": m.role,
                "content": m.content,
            })
        })
        .collect();

    json!({
        "messages": messages,
        "chatbotId": config.chatbot_id,
        "stream": false,
        "temperature": config.temperature,
    })
}

#[derive(Deserialize)]
struct ChatReply {
    text: String,
}
