use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;
use crate::app::services::persistence::STORAGE_KEY;

/// Where the working document is kept between sessions.
pub trait DocumentStore {
    /// The last saved bytes, if any.
    fn load(&self) -> Option<Vec<u8>>;

    fn save(&mut self, bytes: &[u8]) -> Result<()>;
}

/// One JSON file under the platform data directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// data_dir/europass-resume/resume-data-v1.json
    pub fn default_location() -> Self {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("europass-resume");
        path.push(format!("{}.json", STORAGE_KEY));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for LocalStore {
    fn load(&self) -> Option<Vec<u8>> {
        fs::read(&self.path).ok()
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// In-memory store for front-ends that keep nothing on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Option<Vec<u8>> {
        self.bytes.clone()
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::at(dir.path().join("deep").join("doc.json"));
        assert!(store.load().is_none());
        store.save(b"{\"links\": []}").unwrap();
        assert_eq!(store.load().unwrap(), b"{\"links\": []}");
    }

    #[test]
    fn test_local_store_save_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the write fail.
        let path = dir.path().join("taken");
        fs::create_dir_all(&path).unwrap();
        let mut store = LocalStore::at(&path);
        assert!(store.save(b"{}").is_err());
    }

    #[test]
    fn test_default_location_uses_storage_key() {
        let store = LocalStore::default_location();
        assert!(store.path().ends_with("europass-resume/resume-data-v1.json"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert!(store.load().is_none());
        store.save(b"abc").unwrap();
        assert_eq!(store.load().unwrap(), b"abc");
        assert_eq!(MemoryStore::with_bytes("x").load().unwrap(), b"x");
    }
}
