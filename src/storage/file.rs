//! File-backed store: one `<key>.json` file per record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::KeyValueStore;
use crate::error::{StorageError, StorageResult};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.record_path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { key: key.to_string(), source }),
        }
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Write { key: key.to_string(), source })?;
        fs::write(self.record_path(key), value)
            .await
            .map_err(|source| StorageError::Write { key: key.to_string(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert_eq!(store.get("drug_craft_elements").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let dir = temp_dir.path().join("nested").join("save");
        let store = FileStore::new(&dir);

        store.set("drug_craft_elements", "[]".into()).await.unwrap();

        assert!(dir.join("drug_craft_elements.json").exists());
        assert_eq!(store.get("drug_craft_elements").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_unwritable_directory_errors() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot act as the data directory.
        let store = FileStore::new(temp_file.path());
        let err = store.set("drug_craft_elements", "[]".into()).await.unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
