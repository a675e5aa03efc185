//! Editable buffer with caret, selection and active style.
//!
//! [`EditBuffer`] is one tab's editing state. Typed text is stamped with the
//! *active style* (the toolbar selection) rather than the style of its
//! neighbours, so a user who picks "bold" and starts typing gets bold text
//! even in the middle of a plain run.
//!
//! # Examples
//!
//! ```
//! use quillpad::{EditBuffer, Style, TextBuffer};
//!
//! let mut edit = EditBuffer::new(TextBuffer::rich("Hello", Style::plain()));
//! edit.set_caret(5);
//! edit.set_active_style(Style::plain().with_bold());
//! edit.insert_str(" World");
//! assert_eq!(edit.text(), "Hello World");
//! assert!(edit.buffer().style_at(6).is_some_and(Style::is_bold));
//! assert!(edit.buffer().style_at(0).is_some_and(|s| !s.is_bold()));
//! ```

use crate::style::Style;
use crate::text::TextBuffer;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Selection between an anchor and the moving end, as char offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    #[must_use]
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Ordered char range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.anchor.min(self.head)..self.anchor.max(self.head)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Text buffer with caret, selection and live-typing style.
#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    buffer: TextBuffer,
    caret: usize,
    selection: Option<Selection>,
    active_style: Style,
}

impl EditBuffer {
    /// Wrap a buffer with the caret at the start.
    #[must_use]
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            caret: 0,
            selection: None,
            active_style: Style::default(),
        }
    }

    /// Plain-text edit buffer with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::new(TextBuffer::plain(text))
    }

    /// Get the underlying text buffer.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Mutable access to the text buffer.
    ///
    /// Caret and selection are re-clamped on the next edit call.
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Get the full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret.min(self.buffer.len_chars())
    }

    /// Move the caret and drop any selection.
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.buffer.len_chars());
        self.selection = None;
    }

    /// Select a char range; the caret moves to its end.
    pub fn select(&mut self, range: Range<usize>) {
        let range = self.buffer.rope().clamp_range(range);
        self.selection = Some(Selection::new(range.start, range.end));
        self.caret = range.end;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Ordered, clamped selection range (non-empty).
    #[must_use]
    pub fn selection_range(&self) -> Option<Range<usize>> {
        let sel = self.selection?;
        let range = self.buffer.rope().clamp_range(sel.range());
        (!range.is_empty()).then_some(range)
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        self.selection_range().map(|r| self.buffer.slice(r))
    }

    #[must_use]
    pub fn active_style(&self) -> &Style {
        &self.active_style
    }

    /// Set the style stamped onto newly typed text.
    pub fn set_active_style(&mut self, style: Style) {
        self.active_style = style;
    }

    /// Type one character at the caret.
    pub fn insert_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut tmp));
    }

    /// Type text at the caret, replacing the selection if there is one.
    pub fn insert_str(&mut self, text: &str) {
        if let Some(range) = self.selection_range() {
            self.buffer.splice(range.clone(), "");
            self.caret = range.start;
        }
        self.selection = None;
        let offset = self.caret();
        self.buffer.insert_styled(offset, text, &self.active_style);
        self.caret = offset + text.chars().count();
    }

    /// Replace the selected text, keeping the new text selected.
    ///
    /// Does nothing without a selection.
    pub fn replace_selection(&mut self, text: &str) {
        let Some(range) = self.selection_range() else {
            return;
        };
        self.buffer.splice(range.clone(), text);
        let end = range.start + text.chars().count();
        self.selection = Some(Selection::new(range.start, end));
        self.caret = end;
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let caret = self.caret();
        let start = self.prev_boundary(caret);
        if start < caret {
            self.buffer.splice(start..caret, "");
            self.caret = start;
        }
    }

    /// Delete the selection, or the grapheme after the caret.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let caret = self.caret();
        let end = self.next_boundary(caret);
        if end > caret {
            self.buffer.splice(caret..end, "");
            self.caret = caret;
        }
    }

    /// Move caret one grapheme cluster left.
    pub fn move_left(&mut self) {
        let target = self.prev_boundary(self.caret());
        self.set_caret(target);
    }

    /// Move caret one grapheme cluster right.
    pub fn move_right(&mut self) {
        let target = self.next_boundary(self.caret());
        self.set_caret(target);
    }

    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection_range() else {
            self.selection = None;
            return false;
        };
        self.buffer.splice(range.clone(), "");
        self.caret = range.start;
        self.selection = None;
        true
    }

    fn prev_boundary(&self, offset: usize) -> usize {
        let rope = self.buffer.rope();
        let text = rope.to_string();
        let byte = rope.char_to_byte(offset);
        text[..byte]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(start, _)| rope.byte_to_char(start))
    }

    fn next_boundary(&self, offset: usize) -> usize {
        let rope = self.buffer.rope();
        let text = rope.to_string();
        let byte = rope.char_to_byte(offset);
        text[byte..]
            .graphemes(true)
            .next()
            .map_or(offset, |g| rope.byte_to_char(byte + g.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_edit_basic() {
        let mut edit = EditBuffer::with_text("");
        edit.insert_str("Hello");
        assert_eq!(edit.text(), "Hello");
        assert_eq!(edit.caret(), 5);
    }

    #[test]
    fn test_edit_delete() {
        let mut edit = EditBuffer::with_text("Hello");
        edit.set_caret(5);
        edit.delete_backward();
        assert_eq!(edit.text(), "Hell");
        edit.set_caret(0);
        edit.delete_forward();
        assert_eq!(edit.text(), "ell");
        assert_eq!(edit.caret(), 0);
    }

    #[test]
    fn test_grapheme_movement() {
        // "e" + combining acute accent is one grapheme, two chars
        let mut edit = EditBuffer::with_text("ae\u{301}b");
        edit.set_caret(1);
        edit.move_right();
        assert_eq!(edit.caret(), 3);
        edit.move_left();
        assert_eq!(edit.caret(), 1);
        edit.set_caret(3);
        edit.delete_backward();
        assert_eq!(edit.text(), "ab");
    }

    #[test]
    fn test_typing_stamps_active_style() {
        let base = Style::plain();
        let mut edit = EditBuffer::new(TextBuffer::rich("ac", base.clone()));
        let red = Style::plain().with_fg(Rgb::RED);
        edit.set_active_style(red.clone());
        edit.set_caret(1);
        edit.insert_char('b');
        assert_eq!(edit.text(), "abc");
        assert_eq!(edit.buffer().style_at(0), Some(&base));
        assert_eq!(edit.buffer().style_at(1), Some(&red));
        assert_eq!(edit.buffer().style_at(2), Some(&base));
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut edit = EditBuffer::with_text("hello world");
        edit.select(6..11);
        assert_eq!(edit.selected_text().as_deref(), Some("world"));
        edit.insert_str("there");
        assert_eq!(edit.text(), "hello there");
        assert!(edit.selection().is_none());
        assert_eq!(edit.caret(), 11);
    }

    #[test]
    fn test_replace_selection_keeps_selection() {
        let mut edit = EditBuffer::with_text("one two three");
        edit.select(4..7);
        edit.replace_selection("2");
        assert_eq!(edit.text(), "one 2 three");
        assert_eq!(edit.selection_range(), Some(4..5));
    }

    #[test]
    fn test_reversed_selection_is_ordered() {
        let mut edit = EditBuffer::with_text("abcdef");
        edit.select(5..1);
        assert_eq!(edit.selection_range(), Some(1..5));
    }
}
