//! # Storage Collaborators
//!
//! The document talks to three independent stores plus an identity source:
//!
//! - **Local slot**: key-value store holding the serialized document,
//!   overwritten on every autosave
//! - **Published slot**: key-value store holding the published snapshot
//! - **Row store**: remote upsert-by-id table, written on explicit save
//!
//! Each has an in-memory implementation for tests and a file-backed one.

use crate::website::WebsiteRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value slot (browser-storage style)
///
/// Calls may block. Debounced writes are issued from the blocking pool.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Remote row store with upsert-by-id semantics
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn upsert(&self, record: &WebsiteRecord) -> StorageResult<()>;

    async fn fetch(&self, id: &str) -> StorageResult<Option<WebsiteRecord>>;
}

/// Supplies the currently signed-in user, if any
pub trait Identity: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}

// ============================================================================
// In-memory
// ============================================================================

/// In-memory key-value slot; counts writes and can be told to fail
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock_values().insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    fn lock_values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock_values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(StorageError::Backend(format!("write to {} refused", key)));
        }
        self.lock_values().insert(key.to_string(), value.to_string());
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

/// In-memory row store
#[derive(Default)]
pub struct MemoryRowStore {
    rows: Mutex<HashMap<String, WebsiteRecord>>,
    fail: Mutex<bool>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn upsert(&self, record: &WebsiteRecord) -> StorageResult<()> {
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(StorageError::Backend("row store unavailable".to_string()));
        }
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn fetch(&self, id: &str) -> StorageResult<Option<WebsiteRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned())
    }
}

/// Fixed identity, for tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<String>);

impl StaticIdentity {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self(Some(user_id.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl Identity for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.0.clone()
    }
}

// ============================================================================
// File-backed
// ============================================================================

/// Key-value slot stored as `<dir>/<key>.json`
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        read_optional(&self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Row store emulated as one JSON file per row id
pub struct FileRowStore {
    dir: PathBuf,
}

impl FileRowStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl RowStore for FileRowStore {
    async fn upsert(&self, record: &WebsiteRecord) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(&record.id), json).await?;
        Ok(())
    }

    async fn fetch(&self, id: &str) -> StorageResult<Option<WebsiteRecord>> {
        match tokio::fs::read_to_string(self.path_for(id)).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_optional(path: &Path) -> StorageResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
