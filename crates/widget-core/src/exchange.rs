//! The send and regenerate pipelines — the only async paths in the widget.
//!
//! Each pipeline performs a single remote round trip. The store is only
//! borrowed in short synchronous scopes, never across the await, so the UI
//! can keep reading it while a request is outstanding.

use std::cell::RefCell;
use std::rc::Rc;

use widget_types::event::WidgetEvent;
use widget_types::message::Message;
use widget_types::{Result, WidgetError};

use crate::event_bus::EventBus;
use crate::ports::ChatPort;
use crate::store::ConversationStore;

/// Send a user message: optimistic append, one remote round trip, then
/// either the assistant reply is appended or the optimistic message is
/// rolled back. Emits `ReplyReceived` or `SendFailed` for the UI.
pub async fn run_exchange(
    store: Rc<RefCell<ConversationStore>>,
    chat: Rc<dyn ChatPort>,
    conversation_id: String,
    text: String,
    bus: EventBus,
) -> Result<()> {
    match exchange(store, chat.as_ref(), &conversation_id, text).await {
        Ok(()) => {
            bus.emit(WidgetEvent::ReplyReceived { conversation_id });
            Ok(())
        }
        Err(e) => {
            bus.emit(WidgetEvent::SendFailed {
                conversation_id,
                message: e.to_string(),
            });
            Err(e)
        }
    }
}

/// Revise a user message: destructive rewind through the store, then one
/// remote round trip for the regenerated reply. On failure the rewind
/// stands (the conversation stays consistent and the user may retry).
pub async fn run_regeneration(
    store: Rc<RefCell<ConversationStore>>,
    chat: Rc<dyn ChatPort>,
    conversation_id: String,
    message_id: String,
    new_content: String,
    bus: EventBus,
) -> Result<()> {
    match regenerate(store, chat.as_ref(), &conversation_id, &message_id, &new_content).await {
        Ok(()) => {
            bus.emit(WidgetEvent::ReplyReceived { conversation_id });
            Ok(())
        }
        Err(e) => {
            bus.emit(WidgetEvent::SendFailed {
                conversation_id,
                message: e.to_string(),
            });
            Err(e)
        }
    }
}

async fn exchange(
    store: Rc<RefCell<ConversationStore>>,
    chat: &dyn ChatPort,
    conversation_id: &str,
    text: String,
) -> Result<()> {
    let user_message = Message::user(text);

    let history = {
        let mut s = store.borrow_mut();
        let history = s
            .get(conversation_id)
            .map(|c| c.messages.clone())
            .ok_or_else(|| WidgetError::UnknownConversation(conversation_id.to_string()))?;
        s.append_message(conversation_id, user_message.clone())?;
        history
    };

    match chat.send(&history, &user_message).await {
        Ok(reply) => store
            .borrow_mut()
            .append_message(conversation_id, Message::assistant(reply)),
        Err(e) => {
            let mut s = store.borrow_mut();
            if let Err(rollback) = s.delete_message(conversation_id, &user_message.id) {
                log::warn!("Rollback of optimistic message failed: {}", rollback);
            }
            Err(e)
        }
    }
}

async fn regenerate(
    store: Rc<RefCell<ConversationStore>>,
    chat: &dyn ChatPort,
    conversation_id: &str,
    message_id: &str,
    new_content: &str,
) -> Result<()> {
    let (history, edited) = {
        let mut s = store.borrow_mut();
        s.edit_message(conversation_id, message_id, new_content)?;
        let messages = s
            .get(conversation_id)
            .map(|c| c.messages.clone())
            .ok_or_else(|| WidgetError::UnknownConversation(conversation_id.to_string()))?;
        let edited = messages
            .last()
            .cloned()
            .ok_or_else(|| WidgetError::UnknownMessage(message_id.to_string()))?;
        let history = messages[..messages.len() - 1].to_vec();
        (history, edited)
    };

    let reply = chat.send(&history, &edited).await?;
    store
        .borrow_mut()
        .append_message(conversation_id, Message::assistant(reply))
}
