//! Credential persistence
//!
//! The credential lives in client-side key-value storage under a fixed key so
//! a restarted process comes back logged in. [`CredentialStore`] is the
//! contract; the file-backed implementation is the production store and the
//! in-memory one serves tests.

use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{Map, Value};
use thiserror::Error;

/// Fixed key the credential is stored under
pub const TOKEN_KEY: &str = "token";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no data directory available on this platform")]
    NoStorageDir,
}

/// Key-value persistence for the session credential.
pub trait CredentialStore: Send + Sync {
    /// Read the persisted credential, if any
    fn load(&self) -> Result<Option<String>, StorageError>;
    /// Persist the credential
    fn save(&self, token: &str) -> Result<(), StorageError>;
    /// Remove the persisted credential
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed credential store (a small JSON key-value file under the
/// platform data directory).
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store at the default platform location
    pub fn new() -> Result<Self, StorageError> {
        let dir = dirs::data_dir().ok_or(StorageError::NoStorageDir)?;
        Ok(Self {
            path: dir.join("icsmobile").join("storage.json"),
        })
    }

    /// Create a store backed by an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&raw)?;
        Ok(value.as_object().cloned().unwrap_or_default())
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(&Value::Object(map.clone()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let map = self.read_map()?;
        Ok(map
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(TOKEN_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a credential
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.lock().map(|t| t.clone()).unwrap_or_default())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}
