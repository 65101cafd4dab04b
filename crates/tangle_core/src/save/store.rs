use std::collections::BTreeMap;

use super::error::SaveError;

/// Opaque key/blob storage supplied by the persistence collaborator.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError>;

    /// Replaces any existing blob under `key`. Implementations should make
    /// the write atomic: readers see the old blob or the new one.
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError>;

    /// Deleting a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), SaveError>;

    /// Keys starting with `prefix`, sorted.
    fn keys(&self, prefix: &str) -> Result<Vec<String>, SaveError>;
}

/// In-memory store, used by tests and short-lived sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: BTreeMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        self.blobs.remove(key);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, SaveError> {
        Ok(self.blobs.keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basics() {
        let mut store = MemoryBlobStore::new();
        store.put("profiles/ann", &[1, 2, 3]).unwrap();
        store.put("profiles/bo", &[4]).unwrap();
        store.put("ledgers/x", &[5]).unwrap();

        assert_eq!(store.get("profiles/ann").unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(store.keys("profiles/").unwrap(), vec!["profiles/ann", "profiles/bo"]);

        store.delete("profiles/ann").unwrap();
        store.delete("profiles/missing").unwrap();
        assert_eq!(store.get("profiles/ann").unwrap(), None);
        assert_eq!(store.len(), 2);
    }
}
