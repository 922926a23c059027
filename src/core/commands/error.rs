use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command not found: {0}")]
    UnknownCommand(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("is a directory: {}", .0.display())]
    IsADirectory(PathBuf),
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("{0}")]
    Misuse(String),
    #[error("removing parent directory is forbidden: {}", .0.display())]
    SafetyViolation(PathBuf),
    #[error("home directory not found")]
    HomeDirNotFound,
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("{context}: {source}")]
    Archive {
        context: String,
        #[source]
        source: zip::result::ZipError,
    },
}

impl CommandError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        CommandError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn misuse(message: impl Into<String>) -> Self {
        CommandError::Misuse(message.into())
    }

    /// Records the error in the log and hands it back for propagation.
    pub fn logged(self) -> Self {
        error!("{self}");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CommandError::NotFound(PathBuf::from("/tmp/x")).to_string(),
            "no such file or directory: /tmp/x"
        );
        assert_eq!(
            CommandError::misuse("use recursive flag to copy a directory").to_string(),
            "use recursive flag to copy a directory"
        );
        assert_eq!(
            CommandError::io(
                "failed to read /tmp/x",
                io::Error::new(io::ErrorKind::PermissionDenied, "denied")
            )
            .to_string(),
            "failed to read /tmp/x: denied"
        );
    }
}
