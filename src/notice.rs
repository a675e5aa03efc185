//! Notices raised to the editor shell.
//!
//! The core never opens dialogs itself. Every command that needs user
//! attention hands back a [`Notice`] carrying enough context (path, message)
//! for the shell to build one.

use std::path::{Path, PathBuf};

/// Severity of a notice, used by the shell to pick a dialog style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// A user-visible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The file already has an open tab.
    AlreadyOpen { path: PathBuf },
    /// "New file" target exists on disk.
    AlreadyExists { path: PathBuf },
    /// A search found nothing.
    NoResults { query: String },
    /// The tab being closed differs from its file.
    UnsavedChanges { path: PathBuf },
    /// Reading or writing failed.
    Io {
        path: Option<PathBuf>,
        message: String,
    },
    /// The document cannot be written in the requested format.
    UnsupportedFormat { path: PathBuf, reason: String },
}

impl Notice {
    /// Severity of this notice.
    #[must_use]
    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::NoResults { .. } => NoticeLevel::Info,
            Self::AlreadyOpen { .. }
            | Self::AlreadyExists { .. }
            | Self::UnsavedChanges { .. }
            | Self::UnsupportedFormat { .. } => NoticeLevel::Warn,
            Self::Io { .. } => NoticeLevel::Error,
        }
    }

    /// Dialog title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::AlreadyOpen { .. } | Self::AlreadyExists { .. } => "Warning",
            Self::NoResults { .. } => "Search",
            Self::UnsavedChanges { .. } => "Save",
            Self::Io { .. } => "Error",
            Self::UnsupportedFormat { .. } => "Unsupported format",
        }
    }

    /// Dialog body.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AlreadyOpen { path } => format!("File is already open: {}", file_label(path)),
            Self::AlreadyExists { path } => format!("File already exists: {}", file_label(path)),
            Self::NoResults { query } => format!("No results for \"{query}\"."),
            Self::UnsavedChanges { path } => {
                format!("Save changes to {}?", file_label(path))
            }
            Self::Io { message, .. } => message.clone(),
            Self::UnsupportedFormat { path, reason } => {
                format!("Cannot save {}: {reason}", file_label(path))
            }
        }
    }

    /// Path the notice refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::AlreadyOpen { path }
            | Self::AlreadyExists { path }
            | Self::UnsavedChanges { path }
            | Self::UnsupportedFormat { path, .. } => Some(path),
            Self::Io { path, .. } => path.as_deref(),
            Self::NoResults { .. } => None,
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
