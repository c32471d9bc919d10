//! Commit message history
//!
//! A bounded, newest-first list of finalized commit messages that survives
//! across invocations. Entries are only ever prepended or truncated away;
//! replaying an entry does not move it.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::config::Config;
use crate::error::{GemcommitError, Result};

/// Maximum number of entries kept
pub const HISTORY_CAPACITY: usize = 20;

/// Namespace key the entries are stored under
pub const HISTORY_KEY: &str = "gemcommit.commitHistory";

/// Durable storage for the ledger's entries
#[cfg_attr(test, mockall::automock)]
pub trait HistoryStore {
    /// Load stored entries, newest first
    fn load(&self) -> Result<Vec<String>>;

    /// Replace stored entries
    fn save(&self, entries: &[String]) -> Result<()>;
}

impl<T: HistoryStore + ?Sized> HistoryStore for &T {
    fn load(&self) -> Result<Vec<String>> {
        (**self).load()
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        (**self).save(entries)
    }
}

/// Bounded most-recent-first ledger over a [`HistoryStore`]
pub struct HistoryLedger<S> {
    store: S,
}

impl<S: HistoryStore> HistoryLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Prepend `message` and drop everything beyond the capacity
    pub fn record(&self, message: &str) -> Result<()> {
        let mut entries = self.store.load()?;
        entries.insert(0, message.to_string());
        entries.truncate(HISTORY_CAPACITY);
        self.store.save(&entries)
    }

    /// All entries, newest first
    pub fn list(&self) -> Result<Vec<String>> {
        let mut entries = self.store.load()?;
        entries.truncate(HISTORY_CAPACITY);
        Ok(entries)
    }

    /// Entry at zero-based `selection` in [`list`](Self::list) order
    pub fn pick_one(&self, selection: usize) -> Result<Option<String>> {
        Ok(self.list()?.into_iter().nth(selection))
    }
}

/// On-disk layout of the history file
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(rename = "gemcommit.commitHistory", default)]
    entries: Vec<String>,
}

/// JSON file store in the configuration directory
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `history.json` in the config directory
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join("history.json")))
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| GemcommitError::History(format!("{}: {}", self.path.display(), e)))?;

        match serde_json::from_str::<HistoryFile>(&contents) {
            Ok(file) => Ok(file.entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history file is corrupt, starting over");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GemcommitError::History(format!("{}: {}", parent.display(), e)))?;
        }

        let file = HistoryFile {
            entries: entries.to_vec(),
        };
        let contents = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, contents)
            .map_err(|e| GemcommitError::History(format!("{}: {}", self.path.display(), e)))?;

        Ok(())
    }
}
