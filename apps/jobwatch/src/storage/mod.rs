pub mod history;
pub mod report;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::AgentError;

pub use history::HistoryStore;
pub use report::{FileReportSink, ReportSink};

/// Replaces `path` with `contents` in one step: writes a temp file beside it,
/// syncs, then renames over the target. Readers see the old or the new file,
/// never a partial one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AgentError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| AgentError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.txt");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
