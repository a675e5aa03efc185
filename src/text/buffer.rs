//! Document buffer: plain or rich text.
//!
//! [`TextBuffer`] stores text in a rope and tags it with a [`Styling`]
//! variant. Plain buffers carry no formatting. Rich buffers carry a
//! [`StyleRuns`] list that always partitions the whole text. Editing
//! operations keep both in step.

use crate::style::Style;
use crate::text::rope::RopeWrapper;
use crate::text::runs::{StyleRuns, StyledChunk, StyledRun};
use std::ops::Range;

/// Formatting carried by a buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Styling {
    /// Unformatted text.
    Plain,
    /// Formatted text with a run list covering every char.
    Rich(StyleRuns),
}

/// In-memory document content.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    rope: RopeWrapper,
    styling: Styling,
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::plain("")
    }
}

impl TextBuffer {
    /// Create a plain-text buffer.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            styling: Styling::Plain,
            revision: 0,
        }
    }

    /// Create a rich buffer with every char in `base`.
    #[must_use]
    pub fn rich(text: &str, base: Style) -> Self {
        let runs = StyleRuns::new(text.chars().count(), base);
        Self {
            rope: RopeWrapper::from_str(text),
            styling: Styling::Rich(runs),
            revision: 0,
        }
    }

    /// Create a rich buffer from styled chunks.
    #[must_use]
    pub fn from_chunks(chunks: &[StyledChunk<'_>]) -> Self {
        let mut text = String::new();
        let mut parts = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            text.push_str(chunk.text);
            parts.push((chunk.text.chars().count(), chunk.style.clone()));
        }
        Self {
            rope: RopeWrapper::from_str(&text),
            styling: Styling::Rich(StyleRuns::from_lengths(parts)),
            revision: 0,
        }
    }

    /// Full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Copy a char range out.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice_to_string(range)
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the number of lines.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    #[must_use]
    pub fn is_rich(&self) -> bool {
        matches!(self.styling, Styling::Rich(_))
    }

    #[must_use]
    pub fn styling(&self) -> &Styling {
        &self.styling
    }

    /// Styled runs, for rich buffers.
    #[must_use]
    pub fn runs(&self) -> Option<&[StyledRun]> {
        match &self.styling {
            Styling::Plain => None,
            Styling::Rich(runs) => Some(runs.runs()),
        }
    }

    /// Style of the char at `offset`, for rich buffers.
    #[must_use]
    pub fn style_at(&self, offset: usize) -> Option<&Style> {
        match &self.styling {
            Styling::Plain => None,
            Styling::Rich(runs) => runs.style_at(offset),
        }
    }

    /// Get the underlying rope.
    #[must_use]
    pub fn rope(&self) -> &RopeWrapper {
        &self.rope
    }

    /// Revision counter, bumped on every content or style change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the chars in `range` with `text`.
    ///
    /// In a rich buffer the new text takes the style of the first replaced
    /// char, or of the char before the range when the range is empty.
    pub fn splice(&mut self, range: Range<usize>, text: &str) {
        let range = self.rope.clamp_range(range);
        let inherited = self.inherited_style(&range);
        self.rope.remove(range.clone());
        self.rope.insert(range.start, text);
        if let Styling::Rich(runs) = &mut self.styling {
            runs.remove(range.clone());
            runs.insert(range.start, text.chars().count(), inherited);
        }
        self.bump_revision();
    }

    /// Insert text at `offset` with an explicit style.
    ///
    /// Plain buffers ignore the style.
    pub fn insert_styled(&mut self, offset: usize, text: &str, style: &Style) {
        let offset = offset.min(self.len_chars());
        self.rope.insert(offset, text);
        if let Styling::Rich(runs) = &mut self.styling {
            runs.insert(offset, text.chars().count(), style.clone());
        }
        self.bump_revision();
    }

    /// Replace the style over `range`.
    ///
    /// Returns `false` without changing anything when the buffer is plain.
    /// Zero-width ranges are a successful no-op.
    pub fn apply_style(&mut self, range: Range<usize>, style: Style) -> bool {
        let range = self.rope.clamp_range(range);
        let Styling::Rich(runs) = &mut self.styling else {
            return false;
        };
        if !range.is_empty() {
            runs.apply(range, style);
            self.bump_revision();
        }
        true
    }

    /// Turn a plain buffer into a rich one with every char in `base`.
    pub fn promote_to_rich(&mut self, base: Style) {
        if let Styling::Plain = self.styling {
            self.styling = Styling::Rich(StyleRuns::new(self.len_chars(), base));
            self.bump_revision();
        }
    }

    /// Same text and, for rich buffers, same runs.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.styling == other.styling && self.rope.to_string() == other.rope.to_string()
    }

    fn inherited_style(&self, range: &Range<usize>) -> Style {
        let Styling::Rich(runs) = &self.styling else {
            return Style::default();
        };
        let anchor = if range.is_empty() {
            range.start.checked_sub(1)
        } else {
            Some(range.start)
        };
        anchor
            .and_then(|pos| runs.style_at(pos))
            .or_else(|| runs.style_at(range.end))
            .cloned()
            .unwrap_or_default()
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
