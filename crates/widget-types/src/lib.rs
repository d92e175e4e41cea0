pub mod message;
pub mod conversation;
pub mod export;
pub mod config;
pub mod error;
pub mod event;

#[cfg(test)]
mod tests;

pub use error::WidgetError;
pub type Result<T> = std::result::Result<T, WidgetError>;
