//! Session configuration.

use crate::style::Style;
use std::path::{Path, PathBuf};

/// Options for a [`Session`](crate::Session).
#[derive(Clone, Debug)]
pub struct EditorConfig {
    /// Extension appended to new/save-as paths that have none.
    pub default_extension: String,
    /// Extensions (lowercase, no dot) stored as RTF.
    pub rtf_extensions: Vec<String>,
    /// Style for text in rich documents that had no formatting yet.
    pub default_style: Style,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_extension: "txt".to_string(),
            rtf_extensions: vec!["rtf".to_string()],
            default_style: Style::default(),
        }
    }
}

impl EditorConfig {
    /// Set the extension appended to extensionless paths.
    #[must_use]
    pub fn with_default_extension(mut self, ext: impl Into<String>) -> Self {
        self.default_extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the default style of rich documents.
    #[must_use]
    pub fn with_default_style(mut self, style: Style) -> Self {
        self.default_style = style;
        self
    }

    /// Add an extension that is stored as RTF.
    #[must_use]
    pub fn with_rtf_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into().trim_start_matches('.').to_ascii_lowercase();
        if !self.rtf_extensions.contains(&ext) {
            self.rtf_extensions.push(ext);
        }
        self
    }

    /// `path` with the default extension added if it has none.
    #[must_use]
    pub fn with_extension_if_missing(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() || self.default_extension.is_empty() {
            path.to_path_buf()
        } else {
            path.with_extension(&self.default_extension)
        }
    }

    /// Whether `path` is stored as RTF.
    #[must_use]
    pub fn is_rtf_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.rtf_extensions.iter().any(|known| *known == ext)
            })
    }
}
