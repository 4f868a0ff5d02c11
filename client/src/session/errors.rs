use thiserror::Error;

/// Failures of the persisted session and history documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session storage I/O failed at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Session document is invalid: {0}")]
    Serialization(String),
}

impl SessionError {
    pub(crate) fn io(path: &std::path::Path, error: std::io::Error) -> Self {
        SessionError::Io {
            path: path.display().to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(error: serde_json::Error) -> Self {
        SessionError::Serialization(error.to_string())
    }
}
