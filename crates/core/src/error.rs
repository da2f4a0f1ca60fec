use std::path::Path;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Commands file not found at `{}`", .path)]
    FileNotFound { path: String },

    #[error("Error {} commands file at `{}`: {}", .action, .path, .original)]
    Yaml {
        action: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error {} commands file at `{}`: {}", .action, .path, .original)]
    Io {
        action: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Usage: {}", .0)]
    Usage(String),

    #[error("Pasting is not supported on this platform: {}", .0)]
    UnsupportedPlatform(String),

    #[error("Required tool `{}` was not found. Is it installed?", .tool)]
    ToolNotFound { tool: String },

    #[error("`{}` exited with non-success status: {}", .tool, .status)]
    ToolFailed { tool: String, status: String },

    #[error("Clipboard error: {}", .0)]
    Clipboard(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Entry {} in the commands file has an empty command", .index)]
    EmptyCommand { index: usize },

    #[error("No command at index {} (collection has {} entries)", .index, .len)]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{} failed: {}", .operation, .original)]
    Persist {
        operation: String,
        original: Box<Error>,
    },
}

impl Error {
    pub fn yaml_error(action: &str, path: &Path, original: serde_yaml::Error) -> Self {
        Self::Yaml {
            action: action.to_string(),
            path: path.display().to_string(),
            original,
        }
    }

    pub fn io_error(action: &str, path: &Path, original: std::io::Error) -> Self {
        Self::Io {
            action: action.to_string(),
            path: path.display().to_string(),
            original,
        }
    }

    /// Like [`Error::io_error`], but a missing file becomes [`Error::FileNotFound`].
    ///
    /// Only for the read path; a write into a missing directory is an IO error.
    pub fn read_error(path: &Path, original: std::io::Error) -> Self {
        if original.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound {
                path: path.display().to_string(),
            };
        }

        Self::io_error("reading", path, original)
    }

    pub fn persist_error(operation: &str, original: Error) -> Self {
        Self::Persist {
            operation: operation.to_string(),
            original: Box::new(original),
        }
    }

    pub fn usage<S: Into<String>>(message: S) -> Self {
        Self::Usage(message.into())
    }
}
