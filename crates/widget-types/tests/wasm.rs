//! WASM-target tests for widget-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use widget_types::config::*;
use widget_types::conversation::*;
use widget_types::error::*;
use widget_types::event::*;
use widget_types::export::*;
use widget_types::message::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_user() {
    let msg = Message::user("Hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "Hello");
    assert!(!msg.is_edited);
    assert!(!msg.id.is_empty());
}

#[wasm_bindgen_test]
fn message_assistant() {
    let msg = Message::assistant("I can help");
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.content, "I can help");
}

#[wasm_bindgen_test]
fn message_ids_are_unique() {
    let a = Message::user("one");
    let b = Message::user("two");
    assert_ne!(a.id, b.id);
}

#[wasm_bindgen_test]
fn message_timestamp_is_rfc3339() {
    let msg = Message::user("hi");
    assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
}

#[wasm_bindgen_test]
fn message_serialization_roundtrip() {
    let msg = Message::user("test input");
    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, msg);
}

#[wasm_bindgen_test]
fn role_serialization() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        r#""assistant""#
    );
}

// ─── Conversation Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn conversation_new() {
    let conv = Conversation::new("c1".to_string(), "Trip Planning");
    assert_eq!(conv.id, "c1");
    assert_eq!(conv.name, "Trip Planning");
    assert!(conv.messages.is_empty());
    assert_eq!(conv.stats, ConversationStats::default());
}

#[wasm_bindgen_test]
fn conversation_serialization_roundtrip() {
    let mut conv = Conversation::new("c1".to_string(), "Chat");
    conv.messages.push(Message::user("hello"));
    conv.tags.push("travel".to_string());

    let json = serde_json::to_string(&conv).unwrap();
    let deserialized: Conversation = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.id, "c1");
    assert_eq!(deserialized.messages.len(), 1);
    assert_eq!(deserialized.tags, vec!["travel"]);
}

#[wasm_bindgen_test]
fn stats_serialization_field_names() {
    let stats = ConversationStats {
        message_count: 2,
        user_message_count: 1,
        assistant_message_count: 1,
        average_response_time: 1000.0,
        last_active: None,
    };
    let json = serde_json::to_string(&stats).unwrap();
    assert!(json.contains(r#""messageCount":2"#));
    assert!(json.contains(r#""averageResponseTime":1000.0"#));
    assert!(!json.contains("lastActive"));
}

// ─── Export Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn conversation_export_strips_ids() {
    let messages = vec![Message::user("hi"), Message::assistant("hello")];
    let doc = ConversationExport::new("Chat", &messages);
    let json = serde_json::to_string(&doc).unwrap();
    assert!(json.contains(r#""exportDate""#));
    assert!(!json.contains(r#""id""#));
}

#[wasm_bindgen_test]
fn export_file_name_sanitized() {
    let doc = ConversationExport {
        name: "Trip Planning!".to_string(),
        export_date: "2026-08-06T12:00:00+00:00".to_string(),
        messages: Vec::new(),
    };
    assert_eq!(doc.file_name(), "trip_planning__2026-08-06.json");
}

// ─── Config Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn config_default_is_incomplete() {
    let config = WidgetConfig::default();
    assert!(!config.is_complete());
    assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
}

// ─── Event / Error Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn event_serialization() {
    let event = WidgetEvent::ReplyReceived {
        conversation_id: "c1".to_string(),
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("ReplyReceived"));
}

#[wasm_bindgen_test]
fn error_display() {
    assert_eq!(
        WidgetError::ProtectedConversation.to_string(),
        "The default conversation cannot be deleted"
    );
    assert_eq!(
        WidgetError::Network("timeout".to_string()).to_string(),
        "Network error: timeout"
    );
}
