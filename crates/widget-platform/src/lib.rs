//! Browser platform adapters.
//!
//! Implements the `widget-core` port traits against browser APIs:
//! localStorage-backed persistence (with in-memory fallback), the hosted
//! chatbot HTTP client, and a file-download helper for exports.

pub mod storage;
pub mod chat;
pub mod download;
