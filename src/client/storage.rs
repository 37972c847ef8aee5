//! Key/value local storage used by the dashboard session

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::config::ClientConfig;

use super::error::{ClientError, ClientResult};

/// String key/value store with browser local-storage semantics
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove_item(&self, key: &str) -> ClientResult<()>;
}

fn poisoned<T>(_: T) -> ClientError {
    ClientError::Storage("storage lock poisoned".to_string())
}

/// Process-local storage; nothing survives a restart
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.items.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.items
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.items.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// All items kept as one JSON object in a single file.
/// A missing file reads as empty storage.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// File storage at `client.storage_path`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.storage_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ClientError::Storage(format!("{} is not a storage file: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(items)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("user").unwrap(), None);
        storage.set_item("user", "{}").unwrap();
        assert_eq!(storage.get_item("user").unwrap().as_deref(), Some("{}"));
        storage.remove_item("user").unwrap();
        storage.remove_item("user").unwrap();
        assert_eq!(storage.get_item("user").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("access_token").unwrap(), None);
        storage.set_item("access_token", "abc").unwrap();
        storage.set_item("user", r#"{"id":"1"}"#).unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("access_token").unwrap().as_deref(), Some("abc"));
        reopened.remove_item("access_token").unwrap();
        assert_eq!(storage.get_item("access_token").unwrap(), None);
        assert!(storage.get_item("user").unwrap().is_some());
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), b"not json").unwrap();
        let storage = FileStorage::new(file.path());
        assert!(matches!(storage.get_item("user"), Err(ClientError::Storage(_))));
    }
}
