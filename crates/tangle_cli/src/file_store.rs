//! File-backed [`BlobStore`]: one file per key under a root directory.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tangle_core::save::{BlobStore, SaveError};

const BLOB_EXTENSION: &str = "bin";

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SaveError> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(SaveError::Store(format!("invalid key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.{}", key, BLOB_EXTENSION)))
    }
}

fn io_error(context: &str, path: &Path, err: std::io::Error) -> SaveError {
    SaveError::Store(format!("{} {}: {}", context, path.display(), err))
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error("failed to read", &path, err)),
        }
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("failed to create", parent, e))?;
        }

        // Atomic save: write to temp file, then rename
        let mut temp_path = path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);
        {
            let mut file = File::create(&temp_path).map_err(|e| io_error("failed to create", &temp_path, e))?;
            file.write_all(bytes).map_err(|e| io_error("failed to write", &temp_path, e))?;
            file.sync_all().map_err(|e| io_error("failed to sync", &temp_path, e))?;
        }
        fs::rename(&temp_path, &path).map_err(|e| io_error("failed to rename onto", &path, e))?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error("failed to delete", &path, err)),
        }
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, SaveError> {
        let (dir, name_prefix) = match prefix.rfind('/') {
            Some(idx) => (&prefix[..idx], &prefix[idx + 1..]),
            None => ("", prefix),
        };
        let dir_path = self.root.join(dir);
        let entries = match fs::read_dir(&dir_path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error("failed to list", &dir_path, err)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error("failed to list", &dir_path, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(BLOB_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.starts_with(name_prefix) {
                keys.push(if dir.is_empty() { stem.to_string() } else { format!("{}/{}", dir, stem) });
            }
        }
        keys.sort();
        Ok(keys)
    }
}
