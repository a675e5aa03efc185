//! Document persistence: plain text and RTF.
//!
//! The on-disk format is picked from the path extension (see
//! [`EditorConfig::is_rtf_path`]). Plain files load as plain buffers and
//! RTF files as rich buffers. Encoding happens fully in memory before the
//! file is opened for writing, so a rejected save never touches the file.
//!
//! # Examples
//!
//! ```no_run
//! use quillpad::{EditorConfig, format};
//! use std::path::Path;
//!
//! let config = EditorConfig::default();
//! let buffer = format::load(Path::new("notes.rtf"), &config)?;
//! format::save(&buffer, Path::new("copy.rtf"), &config)?;
//! # Ok::<(), quillpad::Error>(())
//! ```

mod plain;
mod rtf;

pub use plain::decode_lines;
pub use rtf::{read_rtf, write_rtf};

use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::text::TextBuffer;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk representation of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    PlainText,
    Rtf,
}

impl Format {
    /// Format used for `path` under `config`.
    #[must_use]
    pub fn for_path(path: &Path, config: &EditorConfig) -> Self {
        if config.is_rtf_path(path) {
            Self::Rtf
        } else {
            Self::PlainText
        }
    }
}

/// Decode file bytes.
pub fn decode(
    bytes: &[u8],
    format: Format,
    path: &Path,
    config: &EditorConfig,
) -> Result<TextBuffer> {
    match format {
        Format::PlainText => {
            let text = std::str::from_utf8(bytes)
                .map_err(|_| Error::InvalidEncoding(path.to_path_buf()))?;
            Ok(TextBuffer::plain(&decode_lines(text)))
        }
        Format::Rtf => read_rtf(bytes, &config.default_style),
    }
}

/// Encode a buffer for writing.
///
/// A rich buffer cannot be written as plain text without dropping its
/// formatting and is rejected with [`Error::UnsupportedFormat`].
pub fn encode(
    buffer: &TextBuffer,
    format: Format,
    path: &Path,
    config: &EditorConfig,
) -> Result<Vec<u8>> {
    match format {
        Format::PlainText if buffer.is_rich() => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: "formatted text cannot be saved as plain text".to_string(),
        }),
        Format::PlainText => Ok(buffer.text().into_bytes()),
        Format::Rtf => Ok(write_rtf(buffer, &config.default_style).into_bytes()),
    }
}

/// Read and decode the file at `path`.
pub fn load(path: &Path, config: &EditorConfig) -> Result<TextBuffer> {
    let format = Format::for_path(path, config);
    let bytes = fs::read(path).map_err(|e| Error::io_at(path, e))?;
    debug!(path = %path.display(), ?format, bytes = bytes.len(), "loading document");
    decode(&bytes, format, path, config)
}

/// Encode `buffer` and write it to `path`.
pub fn save(buffer: &TextBuffer, path: &Path, config: &EditorConfig) -> Result<()> {
    let format = Format::for_path(path, config);
    let bytes = encode(buffer, format, path, config).inspect_err(|err| {
        warn!(path = %path.display(), %err, "refusing to save");
    })?;
    fs::write(path, &bytes).map_err(|e| Error::io_at(path, e))?;
    debug!(path = %path.display(), ?format, bytes = bytes.len(), "saved document");
    Ok(())
}
