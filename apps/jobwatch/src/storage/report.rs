use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::AgentError;
use crate::storage::write_atomic;

/// Receives the rendered digest once per run.
pub trait ReportSink: Send + Sync {
    fn deliver(&self, digest: &str) -> Result<(), AgentError>;
}

/// Writes the digest as a UTF-8 Markdown file, replacing the previous one.
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for FileReportSink {
    fn deliver(&self, digest: &str) -> Result<(), AgentError> {
        write_atomic(&self.path, digest.as_bytes())?;
        info!("Digest saved → {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_writes_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs/latest_digest.md");
        let sink = FileReportSink::new(&path);
        sink.deliver("# Job Search Digest\n\n— ünïcode").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Job Search Digest\n\n— ünïcode"
        );
    }
}
