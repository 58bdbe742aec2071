use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::document;
use super::file_store::FileStore;
use super::http_store::HttpStore;

/// Error type for document store calls
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} returned status {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },
    #[error("invalid JSON at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode the record for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid store url: {0}")]
    InvalidUrl(String),
    #[error("no store configured (set [store] url in config.toml or pass --store)")]
    NotConfigured,
}

/// A REST-style JSON document store.
///
/// Paths are logical (`tasks/3`, `contacts/lastContactId`); backends map
/// them to their own addressing. Every call is a single request with no
/// retry.
pub trait DocumentStore {
    /// Read the document at `path`; missing paths yield `Value::Null`
    fn get(&self, path: &str) -> Result<Value, StoreError>;
    /// Replace the document at `path`
    fn put(&self, path: &str, value: &Value) -> Result<(), StoreError>;
    /// Merge the top-level keys of `partial` into the document at `path`
    fn patch(&self, path: &str, partial: &Value) -> Result<(), StoreError>;
    /// Remove the document at `path`
    fn delete(&self, path: &str) -> Result<(), StoreError>;
}

/// A shared store, so a caller can keep a handle to the store it hands out
impl<S: DocumentStore + ?Sized> DocumentStore for Rc<S> {
    fn get(&self, path: &str) -> Result<Value, StoreError> {
        (**self).get(path)
    }

    fn put(&self, path: &str, value: &Value) -> Result<(), StoreError> {
        (**self).put(path, value)
    }

    fn patch(&self, path: &str, partial: &Value) -> Result<(), StoreError> {
        (**self).patch(path, partial)
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        (**self).delete(path)
    }
}

/// Read and deserialize a document; `null` becomes `None`
pub fn fetch<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    path: &str,
) -> Result<Option<T>, StoreError> {
    let value = store.get(path)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            path: path.to_string(),
            source,
        })
}

/// Serialize a record and write it to `path`.
///
/// A record that fails to encode is never sent; a `null` body would delete it.
pub fn store_record<T: Serialize>(
    store: &dyn DocumentStore,
    path: &str,
    record: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(record).map_err(|source| StoreError::Encode {
        path: path.to_string(),
        source,
    })?;
    store.put(path, &value)
}

/// Open a store from a URL: `http(s)://…`, `file:///path/db.json`, or `memory:`
pub fn open_store(url: &str) -> Result<Box<dyn DocumentStore>, StoreError> {
    let url = url.trim();
    if let Some(path) = url.strip_prefix("file://") {
        if path.is_empty() {
            return Err(StoreError::InvalidUrl(url.to_string()));
        }
        return Ok(Box::new(FileStore::new(path)));
    }
    if url == "memory:" {
        return Ok(Box::new(MemoryStore::new()));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(Box::new(HttpStore::new(url)?));
    }
    Err(StoreError::InvalidUrl(url.to_string()))
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// HTTP-like verb of a recorded store call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Patch,
    Delete,
}

/// One call made against a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Document store held in memory. Records every call, and can be told to
/// fail writes to exercise the no-rollback paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    root: RefCell<Value>,
    calls: RefCell<Vec<StoreCall>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed the store with a whole document tree
    pub fn with_root(root: Value) -> Self {
        MemoryStore {
            root: RefCell::new(root),
            ..MemoryStore::default()
        }
    }

    /// Snapshot of the current document tree
    pub fn root(&self) -> Value {
        self.root.borrow().clone()
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    /// Calls other than reads
    pub fn writes(&self) -> Vec<StoreCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method != Method::Get)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Make every subsequent put/patch/delete fail with a 503
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn record(&self, method: Method, path: &str, body: Option<&Value>) {
        self.calls.borrow_mut().push(StoreCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
    }

    fn check_write(&self, method: &'static str, path: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Status {
                method,
                url: format!("memory:/{}", path.trim_matches('/')),
                status: 503,
            });
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, path: &str) -> Result<Value, StoreError> {
        self.record(Method::Get, path, None);
        Ok(document::get_at(&self.root.borrow(), &document::split_path(path)))
    }

    fn put(&self, path: &str, value: &Value) -> Result<(), StoreError> {
        self.record(Method::Put, path, Some(value));
        self.check_write("PUT", path)?;
        document::put_at(
            &mut self.root.borrow_mut(),
            &document::split_path(path),
            value.clone(),
        );
        Ok(())
    }

    fn patch(&self, path: &str, partial: &Value) -> Result<(), StoreError> {
        self.record(Method::Patch, path, Some(partial));
        self.check_write("PATCH", path)?;
        document::patch_at(
            &mut self.root.borrow_mut(),
            &document::split_path(path),
            partial,
        );
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.record(Method::Delete, path, None);
        self.check_write("DELETE", path)?;
        document::delete_at(&mut self.root.borrow_mut(), &document::split_path(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn store_record_writes_the_encoded_record() {
        let store = MemoryStore::new();
        store_record(&store, "contacts/1", &json!({"name": "Anna"})).unwrap();
        assert_eq!(store.root(), json!({"contacts": {"1": {"name": "Anna"}}}));
    }

    #[test]
    fn unencodable_record_is_not_written() {
        let store = MemoryStore::with_root(json!({"tasks": {"1": {"title": "keep"}}}));
        store.clear_calls();
        // Tuple keys have no JSON object representation
        let bad: BTreeMap<(u8, u8), u8> = BTreeMap::from([((1, 2), 3)]);
        let err = store_record(&store, "tasks/1", &bad).unwrap_err();
        assert!(matches!(err, StoreError::Encode { ref path, .. } if path == "tasks/1"));
        assert!(store.calls().is_empty());
        assert_eq!(store.root()["tasks"]["1"]["title"], "keep");
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.put("tasks/1", &json!({"title": "a"})).unwrap();
        store.patch("tasks/1", &json!({"status": "done"})).unwrap();
        assert_eq!(
            store.get("tasks/1.json").unwrap(),
            json!({"title": "a", "status": "done"})
        );
        store.delete("tasks/1").unwrap();
        assert_eq!(store.get("tasks").unwrap(), Value::Null);
    }

    #[test]
    fn memory_store_records_calls() {
        let store = MemoryStore::new();
        store.get("users").unwrap();
        store.put("users/0", &json!({"name": "a"})).unwrap();
        let calls = store.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[1].method, Method::Put);
        assert_eq!(store.writes().len(), 1);
    }

    #[test]
    fn failing_writes_leave_document_untouched() {
        let store = MemoryStore::with_root(json!({"a": 1}));
        store.set_fail_writes(true);
        let err = store.put("a", &json!(2)).unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 503, .. }));
        assert_eq!(store.root(), json!({"a": 1}));
        // The attempt is still recorded
        assert_eq!(store.writes().len(), 1);
    }

    #[test]
    fn fetch_maps_null_to_none() {
        let store = MemoryStore::with_root(json!({"tasks": {"lastTaskId": 4}}));
        let id: Option<u64> = fetch(&store, "tasks/lastTaskId").unwrap();
        assert_eq!(id, Some(4));
        let missing: Option<u64> = fetch(&store, "contacts/lastContactId").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn fetch_reports_decode_errors() {
        let store = MemoryStore::with_root(json!({"tasks": {"lastTaskId": "four"}}));
        let err = fetch::<u64>(&store, "tasks/lastTaskId").unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn open_store_picks_backend_by_scheme() {
        assert!(open_store("memory:").is_ok());
        assert!(open_store("file:///tmp/taskboard-test.json").is_ok());
        assert!(open_store("https://board.example.com").is_ok());
        assert!(matches!(
            open_store("ftp://x"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(open_store("file://"), Err(StoreError::InvalidUrl(_))));
    }
}
