//! In-memory draft store, the per-session storage analog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use watchdesk_core::{DraftStore, Result};

/// Draft store that lives and dies with the process, like per-tab session
/// storage.
#[derive(Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("draft store poisoned")
            .get(key)
            .cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.entries
            .lock()
            .expect("draft store poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("draft store poisoned")
            .remove(key);
        Ok(())
    }
}
