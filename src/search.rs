//! Literal text search with a navigable match list.
//!
//! [`search`] scans a text snapshot for a query and returns a [`MatchSet`]:
//! the match start offsets in scan order plus a cursor. The set is a
//! snapshot. It does not follow later edits to the text, and callers that
//! navigate a stale set must clamp the reported range themselves.
//!
//! Offsets are char offsets. Matches never overlap: after a hit the scan
//! resumes at `match + query.len()`.
//!
//! # Examples
//!
//! ```
//! use quillpad::search::{Direction, SearchMode, search};
//!
//! let mut matches = search("the cat sat on the mat", "at", SearchMode::All, 0);
//! assert_eq!(matches.offsets(), &[5, 9, 20]);
//! assert_eq!(matches.selected(), Some((5, 2)));
//! assert_eq!(matches.advance(Direction::Previous), Some(20));
//! ```

/// Scan order for [`search`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// From the caret to the end, left to right.
    Forward,
    /// From the caret back to the start, right to left.
    Backward,
    /// The whole text, left to right.
    #[default]
    All,
}

/// Cursor movement through a [`MatchSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

/// Result of one search: ordered match offsets plus a navigation cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSet {
    offsets: Vec<usize>,
    query: String,
    query_len: usize,
    cursor: Option<usize>,
}

impl MatchSet {
    /// An empty set for `query`.
    #[must_use]
    pub fn empty(query: &str) -> Self {
        Self {
            offsets: Vec::new(),
            query: query.to_string(),
            query_len: query.chars().count(),
            cursor: None,
        }
    }

    fn from_offsets(query: &str, offsets: Vec<usize>) -> Self {
        let cursor = (!offsets.is_empty()).then_some(0);
        Self {
            offsets,
            cursor,
            ..Self::empty(query)
        }
    }

    /// Match start offsets in scan order.
    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Index of the current match; `None` when the set is empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Offset of the current match.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.cursor.map(|idx| self.offsets[idx])
    }

    /// `(offset, length)` of the current match, for highlighting.
    #[must_use]
    pub fn selected(&self) -> Option<(usize, usize)> {
        self.current().map(|offset| (offset, self.query_len))
    }

    /// Step the cursor, wrapping at both ends, and return the new offset.
    ///
    /// An empty set stays empty and returns `None`.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        let len = self.offsets.len();
        let idx = self.cursor?;
        let next = match direction {
            Direction::Next => (idx + 1) % len,
            Direction::Previous => (idx + len - 1) % len,
        };
        self.cursor = Some(next);
        self.current()
    }
}

/// Search `text` for `query` from `caret` in the given mode.
///
/// An empty query yields an empty set. A caret past the end is clamped.
/// In [`SearchMode::Backward`] only matches ending at or before the caret
/// are reported, nearest first.
#[must_use]
pub fn search(text: &str, query: &str, mode: SearchMode, caret: usize) -> MatchSet {
    if query.is_empty() {
        return MatchSet::empty(query);
    }

    let caret_byte = char_to_byte(text, caret);
    let offsets = match mode {
        SearchMode::All => to_char_offsets(text, &scan_forward(text, query, 0)),
        SearchMode::Forward => to_char_offsets(text, &scan_forward(text, query, caret_byte)),
        SearchMode::Backward => {
            let mut bytes = scan_backward(text, query, caret_byte);
            bytes.reverse();
            let mut chars = to_char_offsets(text, &bytes);
            chars.reverse();
            chars
        }
    };

    tracing::debug!(query, ?mode, caret, hits = offsets.len(), "search");
    MatchSet::from_offsets(query, offsets)
}

/// Char offsets of every non-overlapping occurrence, left to right.
#[must_use]
pub fn find_all(text: &str, query: &str) -> Vec<usize> {
    search(text, query, SearchMode::All, 0).offsets
}

/// Byte offsets of non-overlapping occurrences from `from` to the end.
pub(crate) fn scan_forward(text: &str, query: &str, from: usize) -> Vec<usize> {
    let mut hits = Vec::new();
    if query.is_empty() {
        return hits;
    }
    let mut pos = from;
    while let Some(found) = text[pos..].find(query) {
        let at = pos + found;
        hits.push(at);
        pos = at + query.len();
    }
    hits
}

/// Byte offsets found by repeated "last occurrence before the cursor".
fn scan_backward(text: &str, query: &str, until: usize) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut end = until;
    while let Some(at) = text[..end].rfind(query) {
        hits.push(at);
        end = at;
    }
    hits
}

fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Convert ascending byte offsets into char offsets in one pass.
fn to_char_offsets(text: &str, ascending: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(ascending.len());
    let mut chars = 0;
    let mut last = 0;
    for &byte in ascending {
        chars += text[last..byte].chars().count();
        last = byte;
        out.push(chars);
    }
    out
}
