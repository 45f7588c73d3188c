// ABOUTME: In-memory token store implementation
// ABOUTME: Process-lifetime storage for tests and hosts without persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::TokenStore;
use crate::errors::Result;

/// In-memory [`TokenStore`] backed by a `HashMap`.
///
/// Values live for the lifetime of the process; a restart forces a fresh
/// login. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_clear_cycle() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.get("session").await.unwrap(), None);

        store.set("session", "tok-1").await.unwrap();
        assert_eq!(
            store.get("session").await.unwrap(),
            Some("tok-1".to_owned())
        );

        store.set("session", "tok-2").await.unwrap();
        assert_eq!(
            store.get("session").await.unwrap(),
            Some("tok-2".to_owned())
        );

        store.clear("session").await.unwrap();
        assert_eq!(store.get("session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryTokenStore::new();
        let other = store.clone();
        store.set("session", "tok").await.unwrap();
        assert_eq!(other.get("session").await.unwrap(), Some("tok".to_owned()));
    }
}
