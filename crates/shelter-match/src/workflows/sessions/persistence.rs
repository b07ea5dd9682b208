use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{AdoptionSession, HistoryEntry};

/// Full persisted state, rewritten as a whole on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDocument {
    pub last_saved: DateTime<Utc>,
    pub sessions: Vec<AdoptionSession>,
    pub match_history: Vec<HistoryEntry>,
}

/// Only the history log is read back on startup.
#[derive(Deserialize)]
struct HistoryOnly {
    #[serde(default)]
    match_history: Vec<HistoryEntry>,
}

/// Storage backend for the session document.
pub trait SessionPersistence: Send + Sync {
    fn save(&self, document: &SessionDocument) -> Result<(), PersistenceError>;
    /// History from the previous run; empty when nothing was saved yet.
    fn load_history(&self) -> Result<Vec<HistoryEntry>, PersistenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to {operation} {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to replace {} with {}: {source}", .target_path.display(), .temp_path.display())]
    AtomicWrite {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode session document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("session document {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// JSON document on local disk, replaced atomically on each save.
#[derive(Debug, Clone)]
pub struct JsonFileSessionPersistence {
    path: PathBuf,
}

impl JsonFileSessionPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SessionPersistence for JsonFileSessionPersistence {
    fn save(&self, document: &SessionDocument) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(PersistenceError::Encode)?;
        let temp_path = self.temp_path();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|source| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(&bytes)
            .map_err(|source| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source,
            })?;
        file.sync_all().map_err(|source| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|source| PersistenceError::AtomicWrite {
            temp_path: temp_path.clone(),
            target_path: self.path.clone(),
            source,
        })?;

        info!(
            path = %self.path.display(),
            sessions = document.sessions.len(),
            history = document.match_history.len(),
            "session document saved"
        );
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let document: HistoryOnly =
            serde_json::from_slice(&raw).map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(document.match_history)
    }
}

/// Keeps the last saved document in memory; used by tests and the demo.
#[derive(Debug, Default)]
pub struct InMemorySessionPersistence {
    seed_history: Vec<HistoryEntry>,
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    last: Option<SessionDocument>,
    saves: usize,
}

impl InMemorySessionPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a previous run left this history behind.
    pub fn with_history(history: Vec<HistoryEntry>) -> Self {
        Self {
            seed_history: history,
            state: Mutex::default(),
        }
    }

    pub fn last_saved(&self) -> Option<SessionDocument> {
        self.state.lock().ok().and_then(|state| state.last.clone())
    }

    pub fn save_count(&self) -> usize {
        self.state.lock().map(|state| state.saves).unwrap_or(0)
    }
}

impl SessionPersistence for InMemorySessionPersistence {
    fn save(&self, document: &SessionDocument) -> Result<(), PersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| PersistenceError::Unavailable("in-memory store poisoned".to_string()))?;
        state.last = Some(document.clone());
        state.saves += 1;
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        Ok(self.seed_history.clone())
    }
}
