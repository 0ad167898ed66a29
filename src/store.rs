// SPDX-License-Identifier: MIT

//! Token persistence port.
//!
//! The store holds at most one token bundle, written as a whole-file
//! replacement. Writes are not atomic; the last writer wins. The trait
//! exists so tests can substitute an in-memory fake for the on-disk
//! store.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key-value persistence port for the single token bundle.
pub trait TokenStore: Send + Sync {
    /// Location of the store, reported back to callers in payloads.
    fn path(&self) -> &Path;

    /// Read and decode the stored bundle.
    fn read(&self) -> Result<Value, StoreError>;

    /// Replace the stored bundle wholesale.
    fn write(&self, tokens: &Value) -> Result<(), StoreError>;
}

/// Token store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid token store contents: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Token store backed by a single JSON file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Value, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write(&self, tokens: &Value) -> Result<(), StoreError> {
        let contents = serde_json::to_string(tokens)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-memory token store for tests.
pub struct MemoryTokenStore {
    path: PathBuf,
    tokens: Mutex<Option<Value>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            tokens: Mutex::new(None),
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Value, StoreError> {
        self.tokens
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
            .ok_or(StoreError::NotFound)
    }

    fn write(&self, tokens: &Value) -> Result<(), StoreError> {
        *self
            .tokens
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(tokens.clone());
        Ok(())
    }
}
