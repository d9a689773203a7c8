use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the core editing operations.
///
/// Only [`EditorError::Io`] forces a reload of on-disk state; every other
/// kind is handled by the operation that detected it.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Invalid position!")]
    OutOfBounds,

    #[error("File is read-only!")]
    ReadOnly,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    MalformedInput(String),

    #[error("Unknown command, press F1 for help")]
    UnknownCommand,

    #[error("No such file or directory: {}", .0.display())]
    NoSuchFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_system_text() {
        let err: EditorError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied").into();
        assert_eq!(err.to_string(), "Permission denied");
    }

    #[test]
    fn test_read_only_message() {
        assert_eq!(EditorError::ReadOnly.to_string(), "File is read-only!");
    }
}
