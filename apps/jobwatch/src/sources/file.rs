use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AgentError;
use crate::models::Job;
use crate::sources::{decode_postings, PostingSource};

/// Reads postings from a JSON array on disk, e.g. the output of an external scraper.
pub struct FilePostingSource {
    path: PathBuf,
}

impl FilePostingSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PostingSource for FilePostingSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<Job>, AgentError> {
        debug!("Reading postings from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        decode_postings(serde_json::from_str(&text)?)
    }
}
