//! WASM-target tests for widget-core.
//!
//! Runs EventBus, stats, search, and ConversationStore tests under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use widget_core::event_bus::EventBus;
use widget_core::ports::StoragePort;
use widget_core::search::filter_messages;
use widget_core::stats;
use widget_core::store::{ConversationStore, DEFAULT_CONVERSATION_ID};
use widget_types::event::WidgetEvent;
use widget_types::message::*;
use widget_types::{Result, WidgetError};

struct MockStorage {
    data: RefCell<HashMap<String, String>>,
}

impl MockStorage {
    fn new() -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
        }
    }
}

impl StoragePort for MockStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn make_store() -> ConversationStore {
    ConversationStore::load(Rc::new(MockStorage::new()))
}

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(WidgetEvent::ReplyReceived {
        conversation_id: "c1".to_string(),
    });
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 1);
    assert!(!bus.has_pending());
}

// ─── Stats Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn stats_average_response_time() {
    let messages = vec![
        Message::with_timestamp(Role::User, "hi", "2026-08-06T12:00:00+00:00"),
        Message::with_timestamp(Role::Assistant, "hello", "2026-08-06T12:00:01+00:00"),
    ];
    let s = stats::compute(&messages);
    assert_eq!(s.average_response_time, 1000.0);
    assert_eq!(s.message_count, 2);
}

#[wasm_bindgen_test]
fn stats_unparsable_timestamp_contributes_zero() {
    let messages = vec![
        Message::with_timestamp(Role::User, "q", "yesterday"),
        Message::with_timestamp(Role::Assistant, "a", "2026-08-06T12:00:01+00:00"),
    ];
    let s = stats::compute(&messages);
    assert_eq!(s.average_response_time, 0.0);
}

// ─── Search Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn search_empty_query_is_identity() {
    let messages = vec![Message::user("first"), Message::assistant("second")];
    let result = filter_messages(&messages, "");
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].content, "first");
}

#[wasm_bindgen_test]
fn search_fuzzy_match() {
    let messages = vec![
        Message::user("Where should I go in Japan?"),
        Message::assistant("Try Kyoto in spring."),
    ];
    let result = filter_messages(&messages, "kyotto");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].content, "Try Kyoto in spring.");
}

// ─── Store Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn store_seeds_default_conversation() {
    let store = make_store();
    assert_eq!(store.len(), 1);
    assert_eq!(store.selected_id(), DEFAULT_CONVERSATION_ID);
}

#[wasm_bindgen_test]
fn store_create_and_append() {
    let mut store = make_store();
    let id = store.create("Trip Planning").unwrap();
    store
        .append_message(&id, Message::user("Where should I go in Japan?"))
        .unwrap();
    store
        .append_message(&id, Message::assistant("Try Kyoto in spring."))
        .unwrap();

    let conv = store.get(&id).unwrap();
    assert_eq!(conv.stats.message_count, 2);
    assert_eq!(conv.stats.user_message_count, 1);
    assert_eq!(conv.stats.assistant_message_count, 1);
}

#[wasm_bindgen_test]
fn store_delete_default_is_refused() {
    let mut store = make_store();
    assert!(matches!(
        store.delete(DEFAULT_CONVERSATION_ID),
        Err(WidgetError::ProtectedConversation)
    ));
}

#[wasm_bindgen_test]
fn store_export_import_round_trip() {
    let mut store = make_store();
    let id = store.create("Round Trip").unwrap();
    store.append_message(&id, Message::user("q")).unwrap();

    let doc = store.export(&id).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    let imported_id = store.import(&json).unwrap();

    assert_ne!(imported_id, id);
    let imported = store.get(&imported_id).unwrap();
    assert_eq!(imported.name, "Round Trip");
    assert_eq!(imported.messages[0].content, "q");
}
