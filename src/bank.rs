//! Runtime access to the persisted word bank.
//!
//! A `WordBank` reads its file at most once; `reload` drops the in-memory copy
//! and re-reads it, so the builder can regenerate the file under a live process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::core::normalize::normalize;
use crate::core::types::WordBankEntry;
use crate::error::Result;
use crate::persistence::{load_bank, BankMap};

pub struct WordBank {
    path: PathBuf,
    entries: RwLock<Option<Arc<BankMap>>>,
}

impl WordBank {
    /// Creates an accessor for `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the bank if it has not been read yet.
    pub fn load(&self) -> Result<()> {
        self.entries().map(|_| ())
    }

    /// Drops the cached copy and reads the file again.
    pub fn reload(&self) -> Result<()> {
        let mut guard = self.entries.write();
        *guard = None;
        let fresh = Arc::new(load_bank(&self.path)?);
        info!(path = %self.path.display(), entries = fresh.len(), "word bank reloaded");
        *guard = Some(fresh);
        Ok(())
    }

    fn entries(&self) -> Result<Arc<BankMap>> {
        if let Some(entries) = self.entries.read().as_ref() {
            return Ok(Arc::clone(entries));
        }
        let mut guard = self.entries.write();
        // Another reader may have loaded it while we waited for the lock.
        if let Some(entries) = guard.as_ref() {
            return Ok(Arc::clone(entries));
        }
        let loaded = Arc::new(load_bank(&self.path)?);
        info!(path = %self.path.display(), entries = loaded.len(), "word bank loaded");
        *guard = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn has(&self, word: &str) -> Result<bool> {
        Ok(self.entries()?.contains_key(&normalize(word)))
    }

    pub fn get_entry(&self, word: &str) -> Result<Option<WordBankEntry>> {
        Ok(self.entries()?.get(&normalize(word)).cloned())
    }

    pub fn get_ipa(&self, word: &str) -> Result<Option<String>> {
        Ok(self.get_entry(word)?.map(|e| e.ipa))
    }

    pub fn get_syllables(&self, word: &str) -> Result<Option<Vec<String>>> {
        Ok(self.get_entry(word)?.map(|e| e.syllables))
    }

    /// All normalized keys, sorted.
    pub fn available_words(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.keys().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.entries()?.is_empty())
    }
}
