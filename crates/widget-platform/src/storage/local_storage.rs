//! localStorage storage backend.
//! Persistent across page reloads; the API is synchronous, which is what
//! lets store mutations persist before they return.

use widget_core::ports::StoragePort;
use widget_types::{Result, WidgetError};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Bind to `window.localStorage`. Fails when the widget runs outside a
    /// window context or the embedding page denies storage access.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WidgetError::Storage("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| WidgetError::Storage("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}
