//! Error types for quillpad.

use crate::binding::BufferId;
use crate::notice::Notice;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for quillpad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for quillpad operations.
///
/// Every variant is contained to the command that raised it; none of them
/// leave a session in a partially updated state.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading or writing a document.
    Io {
        path: Option<PathBuf>,
        source: io::Error,
    },
    /// The path already has an open tab.
    AlreadyOpen(PathBuf),
    /// "New file" was asked to create a path that already exists on disk.
    AlreadyExists(PathBuf),
    /// No tab with this buffer id.
    UnknownBuffer(BufferId),
    /// The document cannot be written in the format chosen by the path.
    UnsupportedFormat { path: PathBuf, reason: String },
    /// A plain-text file is not valid UTF-8.
    InvalidEncoding(PathBuf),
    /// Malformed RTF input.
    InvalidRtf(String),
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Styling was requested on a plain-text document.
    PlainDocument(BufferId),
}

impl Error {
    /// Attach a path to an I/O error.
    pub(crate) fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// The notice the shell should show for this error.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::AlreadyOpen(path) => Notice::AlreadyOpen { path: path.clone() },
            Self::AlreadyExists(path) => Notice::AlreadyExists { path: path.clone() },
            Self::UnsupportedFormat { path, reason } => Notice::UnsupportedFormat {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::Io { path, .. } => Notice::Io {
                path: path.clone(),
                message: self.to_string(),
            },
            Self::InvalidEncoding(path) => Notice::Io {
                path: Some(path.clone()),
                message: self.to_string(),
            },
            _ => Notice::Io {
                path: None,
                message: self.to_string(),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path: Some(path),
                source,
            } => write!(f, "I/O error on {}: {source}", path.display()),
            Self::Io { path: None, source } => write!(f, "I/O error: {source}"),
            Self::AlreadyOpen(path) => write!(f, "file already open: {}", path.display()),
            Self::AlreadyExists(path) => write!(f, "file already exists: {}", path.display()),
            Self::UnknownBuffer(id) => write!(f, "no open tab for buffer {}", id.get()),
            Self::UnsupportedFormat { path, reason } => {
                write!(f, "cannot save {}: {reason}", path.display())
            }
            Self::InvalidEncoding(path) => {
                write!(f, "file is not valid UTF-8: {}", path.display())
            }
            Self::InvalidRtf(msg) => write!(f, "invalid RTF: {msg}"),
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::PlainDocument(id) => {
                write!(f, "buffer {} is plain text and cannot be styled", id.get())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io {
            path: None,
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidColor("not-a-color".to_string());
        assert!(err.to_string().contains("invalid color format"));

        let err = Error::AlreadyOpen(PathBuf::from("/tmp/notes.txt"));
        assert!(err.to_string().contains("/tmp/notes.txt"));

        let err = Error::io_at(
            "/tmp/missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.txt"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io { path: None, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_notice_mapping() {
        let path = PathBuf::from("/tmp/a.txt");
        assert_eq!(
            Error::AlreadyExists(path.clone()).notice(),
            Notice::AlreadyExists { path: path.clone() }
        );
        let notice = Error::io_at(&path, io::Error::other("disk full")).notice();
        assert!(matches!(notice, Notice::Io { path: Some(p), .. } if p == path));
    }
}
