use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::document;
use super::store::{DocumentStore, StoreError};

/// Document store backed by a single JSON file.
///
/// Every call reads the file (a missing file is an empty document) and
/// writes go through a temp file in the same directory, then rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_root(&self) -> Result<Value, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Value::Null),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Decode {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_root(&self, root: &Value) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(io_err)?;
        let text = serde_json::to_string_pretty(root).map_err(|source| StoreError::Decode {
            path: self.path.display().to_string(),
            source,
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(text.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Value)) -> Result<(), StoreError> {
        let mut root = self.read_root()?;
        f(&mut root);
        self.write_root(&root)
    }
}

impl DocumentStore for FileStore {
    fn get(&self, path: &str) -> Result<Value, StoreError> {
        tracing::debug!(method = "GET", path, file = %self.path.display(), "store request");
        let root = self.read_root()?;
        Ok(document::get_at(&root, &document::split_path(path)))
    }

    fn put(&self, path: &str, value: &Value) -> Result<(), StoreError> {
        tracing::debug!(method = "PUT", path, file = %self.path.display(), "store request");
        self.modify(|root| document::put_at(root, &document::split_path(path), value.clone()))
    }

    fn patch(&self, path: &str, partial: &Value) -> Result<(), StoreError> {
        tracing::debug!(method = "PATCH", path, file = %self.path.display(), "store request");
        self.modify(|root| document::patch_at(root, &document::split_path(path), partial))
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        tracing::debug!(method = "DELETE", path, file = %self.path.display(), "store request");
        self.modify(|root| document::delete_at(root, &document::split_path(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_null() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("db.json"));
        assert_eq!(store.get("tasks").unwrap(), Value::Null);
    }

    #[test]
    fn writes_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("db.json");
        let store = FileStore::new(&path);
        store.put("tasks/1", &json!({"title": "a"})).unwrap();
        store.patch("tasks/1", &json!({"status": "done"})).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("tasks/1").unwrap(),
            json!({"title": "a", "status": "done"})
        );
        reopened.delete("tasks/1").unwrap();
        assert_eq!(reopened.get("").unwrap(), Value::Null);
    }

    #[test]
    fn malformed_file_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "not json {{{").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("tasks"), Err(StoreError::Decode { .. })));
    }
}
