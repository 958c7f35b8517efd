use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::error::StorageResult;

/// Store that lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        let mut records = self.records.write().await;
        records.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1".into()).await.unwrap();
        store.set("k", "v2".into()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_blocking_access() {
        let store = MemoryStore::new();
        tokio_test::block_on(store.set("drug_craft_elements", "[]".into())).unwrap();
        let value = tokio_test::block_on(store.get("drug_craft_elements")).unwrap();
        assert_eq!(value.as_deref(), Some("[]"));
    }
}
