//! Port traits — the boundary between the store core and the browser.
//!
//! These traits are defined here in `widget-core` (pure Rust).
//! Implementations live in `widget-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use widget_types::{message::Message, Result};

// ─── Storage Port ────────────────────────────────────────────

/// Durable key-value storage.
///
/// Browser local storage is a synchronous API, so the port is synchronous:
/// every store mutation re-serializes its full state and writes it before
/// the operation returns. Acceptable only at this data scale (a handful of
/// conversations, a few hundred messages each).
pub trait StoragePort {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Chat Port ───────────────────────────────────────────────

/// One request/response exchange with the hosted chatbot.
#[async_trait(?Send)]
pub trait ChatPort {
    /// Send the prior message history plus one new message; returns the
    /// assistant reply text. Single round trip — no retry, no streaming,
    /// no cancellation.
    async fn send(&self, history: &[Message], new_message: &Message) -> Result<String>;
}
