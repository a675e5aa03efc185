//! Rope wrapper using the ropey crate.
//!
//! All positions are char offsets. Out-of-range positions and ranges are
//! clamped to the text instead of panicking, since offsets coming from the
//! shell or from a stale match list may point past the end.

use ropey::Rope;
use std::ops::Range;

/// Wrapper around `ropey::Rope` with clamping, char-indexed helpers.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
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
        self.rope.len_bytes() == 0
    }

    /// Clamp a char range to the rope, swapping reversed bounds.
    #[must_use]
    pub fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len_chars();
        let (a, b) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        a.min(len)..b.min(len)
    }

    /// Copy a char range out as a string.
    #[must_use]
    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        self.rope.slice(range).to_string()
    }

    /// Character at a char offset.
    #[must_use]
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        self.rope.get_char(char_idx)
    }

    /// Insert text at a character position (clamped to the end).
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Remove a range of characters (clamped).
    pub fn remove(&mut self, range: Range<usize>) {
        let range = self.clamp_range(range);
        if !range.is_empty() {
            self.rope.remove(range);
        }
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Convert char index to byte index.
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        self.rope.char_to_byte(char_idx.min(self.len_chars()))
    }

    /// Convert byte index to char index.
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        self.rope.byte_to_char(byte_idx.min(self.rope.len_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rope_basic() {
        let rope = RopeWrapper::from_str("Hello, world!");
        assert_eq!(rope.len_chars(), 13);
        assert_eq!(rope.len_lines(), 1);
        assert_eq!(rope.char_at(7), Some('w'));
        assert_eq!(rope.char_at(13), None);
    }

    #[test]
    fn test_rope_insert_clamps() {
        let mut rope = RopeWrapper::from_str("Hello");
        rope.insert(99, "!");
        assert_eq!(rope.to_string(), "Hello!");
    }

    #[test]
    fn test_rope_remove_reversed_and_oob() {
        let mut rope = RopeWrapper::from_str("Hello, world!");
        rope.remove(12..5);
        assert_eq!(rope.to_string(), "Hello!");
        rope.remove(3..100);
        assert_eq!(rope.to_string(), "Hel");
    }

    #[test]
    fn test_multibyte_offsets() {
        let rope = RopeWrapper::from_str("héllo");
        assert_eq!(rope.char_to_byte(2), 3);
        assert_eq!(rope.byte_to_char(3), 2);
        assert_eq!(rope.slice_to_string(1..3), "él");
    }
}
