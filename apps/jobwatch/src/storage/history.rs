//! History store: the only state carried between runs.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AgentError;
use crate::models::Job;
use crate::pipeline::reconcile::History;
use crate::storage::write_atomic;

/// Persisted layouts. Older files wrap the list as `{"jobs": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredHistory {
    List(Vec<Job>),
    Wrapped { jobs: Vec<Job> },
}

/// JSON file holding the list of every job seen so far.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads prior history.
    ///
    /// A missing file is a first run and yields an empty history. Unparseable
    /// contents are logged and also yield an empty history: the worst case is
    /// re-reporting known jobs as new. Other I/O failures are returned.
    pub fn load(&self) -> Result<History, AgentError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No history at {}; starting fresh", self.path.display());
                return Ok(History::new());
            }
            Err(e) => return Err(e.into()),
        };

        match parse_history(&text) {
            Ok(jobs) => {
                let history = History::from_jobs(jobs);
                info!("Loaded {} tracked jobs from {}", history.len(), self.path.display());
                Ok(history)
            }
            Err(err) => {
                warn!(
                    code = err.code(),
                    "Ignoring history at {}: {err}",
                    self.path.display()
                );
                Ok(History::new())
            }
        }
    }

    /// Writes `history` as a pretty-printed JSON list, replacing the previous file atomically.
    pub fn save(&self, history: &History) -> Result<(), AgentError> {
        let jobs: Vec<&Job> = history.jobs().collect();
        let json = serde_json::to_string_pretty(&jobs)?;
        write_atomic(&self.path, json.as_bytes())?;
        info!("Saved {} tracked jobs to {}", jobs.len(), self.path.display());
        Ok(())
    }
}

pub fn parse_history(text: &str) -> Result<Vec<Job>, AgentError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<StoredHistory>(text) {
        Ok(StoredHistory::List(jobs)) | Ok(StoredHistory::Wrapped { jobs }) => Ok(jobs),
        Err(e) => Err(AgentError::HistoryCorrupt(e.to_string())),
    }
}
