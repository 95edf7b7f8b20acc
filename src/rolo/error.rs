use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoloError {
    #[error("Contact '{0}' already exists")]
    DuplicateName(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Position {position} is out of range (there are {count} notes)")]
    OutOfRange { position: usize, count: usize },

    #[error("Unsupported operation '{0}'")]
    UnsupportedOperation(String),

    #[error("Wrong arguments for '{verb}': expected {expected}")]
    ArityMismatch { verb: String, expected: String },

    #[error("Snapshot is unreadable: {0}")]
    CorruptSnapshot(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The error taxonomy without payloads, for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateName,
    NotFound,
    OutOfRange,
    UnsupportedOperation,
    ArityMismatch,
    CorruptSnapshot,
    InvalidValue,
    Config,
    Io,
}

impl RoloError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoloError::DuplicateName(_) => ErrorKind::DuplicateName,
            RoloError::NotFound(_) => ErrorKind::NotFound,
            RoloError::OutOfRange { .. } => ErrorKind::OutOfRange,
            RoloError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            RoloError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            RoloError::CorruptSnapshot(_) => ErrorKind::CorruptSnapshot,
            RoloError::InvalidValue(_) => ErrorKind::InvalidValue,
            RoloError::Config(_) => ErrorKind::Config,
            RoloError::Io(_) | RoloError::Serialization(_) => ErrorKind::Io,
        }
    }

    /// Dispatch-level rejections, as opposed to failures of the operation itself.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnsupportedOperation | ErrorKind::ArityMismatch
        )
    }

    pub(crate) fn contact_not_found(name: &str) -> Self {
        RoloError::NotFound(format!("Contact '{}' not found", name))
    }
}

pub type Result<T> = std::result::Result<T, RoloError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_only_dispatch_kinds() {
        assert!(RoloError::UnsupportedOperation("fly".into()).is_rejection());
        assert!(RoloError::ArityMismatch {
            verb: "add".into(),
            expected: "<name>".into()
        }
        .is_rejection());
        assert!(!RoloError::contact_not_found("alice").is_rejection());
        assert!(!RoloError::OutOfRange {
            position: 3,
            count: 1
        }
        .is_rejection());
    }

    #[test]
    fn not_found_message_names_contact() {
        assert_eq!(
            RoloError::contact_not_found("bob").to_string(),
            "Contact 'bob' not found"
        );
    }
}
