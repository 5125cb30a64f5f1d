#![allow(dead_code)]

use thiserror::Error;

/// Agent-level error type.
///
/// The first three variants are the core's recoverable kinds: callers log them
/// and continue with a documented default. The rest come from collaborators
/// (disk, network) and are surfaced to `main`.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("History corrupt: {0}")]
    HistoryCorrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },
}

impl AgentError {
    /// Stable machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            AgentError::MalformedInput(_) => "MALFORMED_INPUT",
            AgentError::ConfigurationMissing(_) => "CONFIGURATION_MISSING",
            AgentError::HistoryCorrupt(_) => "HISTORY_CORRUPT",
            AgentError::Io(_) => "IO_ERROR",
            AgentError::Json(_) => "JSON_ERROR",
            AgentError::Http(_) => "HTTP_ERROR",
            AgentError::Upstream { .. } => "UPSTREAM_ERROR",
        }
    }

    /// Whether the pipeline absorbs this error with a default instead of aborting the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AgentError::MalformedInput(_)
                | AgentError::ConfigurationMissing(_)
                | AgentError::HistoryCorrupt(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_kinds_are_recoverable() {
        assert!(AgentError::MalformedInput("x".into()).is_recoverable());
        assert!(AgentError::ConfigurationMissing("x".into()).is_recoverable());
        assert!(AgentError::HistoryCorrupt("x".into()).is_recoverable());
    }

    #[test]
    fn test_collaborator_failures_are_not_recoverable() {
        let io = AgentError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_recoverable());
        let upstream = AgentError::Upstream {
            status: 404,
            message: "gone".into(),
        };
        assert!(!upstream.is_recoverable());
        assert_eq!(upstream.code(), "UPSTREAM_ERROR");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = AgentError::HistoryCorrupt("expected `[`".into());
        assert_eq!(err.to_string(), "History corrupt: expected `[`");
    }
}
