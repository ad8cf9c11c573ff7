//! JSON file-based document store.
//!
//! The whole persisted document lives in one human-readable JSON file. Writes
//! are atomic (write-to-temp + rename) so a crash mid-save never leaves a
//! corrupt file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads the entire document into memory
//! - **Write**: O(n) - serializes and writes the whole document
//! - **Best for**: one small document, infrequent writes

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::domain::error::{Result, SleepBunnyError};
use crate::storage::document::PersistedDocument;

/// JSON document store.
///
/// Stateless apart from the file path: every read hits the file, every write
/// rewrites it. That keeps the store trivially consistent with anything else
/// touching the file and matches the small size of the document.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "userProfile": { "name": "지민", "createdAt": "...", "lastVisit": "..." },
///   "settings": { "darkMode": false, "volume": 0.7 },
///   "feedHistory": [],
///   "readingHistory": [],
///   "soundSettings": { "lastSound": null, "playHistory": [] },
///   "statistics": { "totalFeeds": 0, "feedDetails": {} }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonStore {
    /// Creates a store over `file_path`.
    ///
    /// Parent directories are created automatically. The file itself is not
    /// touched until the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sleepbunny::storage::JsonStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonStore::open(PathBuf::from("/tmp/sleepbunny.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the document.
    ///
    /// Returns `None` when the file is absent or unreadable or its contents
    /// do not parse. Loading never fails: a damaged file is treated as no
    /// document, and the next save overwrites it.
    pub fn load(&self) -> Option<PersistedDocument> {
        let _span = tracing::debug_span!("store_load", path = ?self.file_path).entered();

        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no document on disk");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read document");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(doc) => {
                tracing::debug!("document loaded");
                Some(doc)
            }
            Err(e) => {
                tracing::warn!(error = %e, "document is malformed, ignoring");
                None
            }
        }
    }

    /// Loads the document, or a fresh default when none exists.
    pub fn load_or_default(&self) -> PersistedDocument {
        self.load().unwrap_or_default()
    }

    /// Saves the document using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target
    /// path, so the file is never left half-written.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, the temporary file cannot be
    /// written, or the rename fails.
    pub fn save(&self, doc: &PersistedDocument) -> Result<()> {
        let _span = tracing::debug_span!("store_save", path = ?self.file_path).entered();

        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| SleepBunnyError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("document saved");
        Ok(())
    }

    /// Loads the document (or a default), applies `mutate`, and saves.
    ///
    /// Returns the saved document.
    pub fn update<F>(&self, mutate: F) -> Result<PersistedDocument>
    where
        F: FnOnce(&mut PersistedDocument),
    {
        let mut doc = self.load_or_default();
        mutate(&mut doc);
        self.save(&doc)?;
        Ok(doc)
    }

    /// Loads the stored document (or a default), records an app open, and
    /// persists the result.
    pub fn initialize_session(&self) -> Result<PersistedDocument> {
        let _span = tracing::debug_span!("store_init").entered();
        self.update(|doc| doc.record_app_open(Utc::now()))
    }

    /// Serializes the current document (or a default) as pretty JSON, for
    /// user-facing backups.
    pub fn export(&self) -> Result<String> {
        let doc = self.load_or_default();
        serde_json::to_string_pretty(&doc)
            .map_err(|e| SleepBunnyError::Storage(format!("failed to serialize JSON: {e}")))
    }

    /// Replaces the stored document with `json`.
    ///
    /// The payload is parsed before anything is written, so a malformed
    /// backup leaves the existing document untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` does not parse as a document, or the save
    /// fails.
    pub fn import(&self, json: &str) -> Result<PersistedDocument> {
        let _span = tracing::debug_span!("store_import").entered();

        let doc: PersistedDocument = serde_json::from_str(json)
            .map_err(|e| SleepBunnyError::Storage(format!("invalid backup: {e}")))?;
        self.save(&doc)?;

        tracing::debug!("document imported");
        Ok(doc)
    }

    /// Deletes the stored document. Missing files are not an error.
    pub fn reset(&self) -> Result<()> {
        let _span = tracing::debug_span!("store_reset", path = ?self.file_path).entered();

        match std::fs::remove_file(&self.file_path) {
            Ok(()) => {
                tracing::debug!("document deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Size of the stored document in bytes, or 0 when none exists.
    pub fn storage_size(&self) -> u64 {
        std::fs::metadata(&self.file_path)
            .map(|m| m.len())
            .unwrap_or(0)
    }
}
