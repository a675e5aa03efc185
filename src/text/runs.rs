//! Styled runs for rich text.
//!
//! A [`StyleRuns`] list partitions `[0, len)` of a document into contiguous
//! runs that each carry one [`Style`]. After every mutation the list holds
//! no empty runs, no gaps, no overlaps, and no two adjacent runs with equal
//! styles.

use crate::style::Style;
use std::ops::Range;

/// A contiguous char range sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    /// Char offset of the first character.
    pub start: usize,
    /// Number of chars.
    pub len: usize,
    /// Style applied to this run.
    pub style: Style,
}

impl StyledRun {
    /// Create a new styled run.
    #[must_use]
    pub fn new(start: usize, len: usize, style: Style) -> Self {
        Self { start, len, style }
    }

    /// One past the last char offset.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Check if this run contains a position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.range().contains(&pos)
    }
}

/// A chunk of styled text for building rich content.
#[derive(Clone, Debug)]
pub struct StyledChunk<'a> {
    /// The text content.
    pub text: &'a str,
    /// The style to apply.
    pub style: Style,
}

impl<'a> StyledChunk<'a> {
    /// Create a new styled chunk.
    #[must_use]
    pub fn new(text: &'a str, style: Style) -> Self {
        Self { text, style }
    }

    /// Create a chunk with the default style.
    #[must_use]
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }
}

/// Ordered run list partitioning a rich document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleRuns {
    runs: Vec<StyledRun>,
}

impl StyleRuns {
    /// A single run of `len` chars, or no runs for empty text.
    #[must_use]
    pub fn new(len: usize, style: Style) -> Self {
        let mut runs = Self::default();
        runs.insert(0, len, style);
        runs
    }

    /// Build from `(len, style)` pairs in document order.
    #[must_use]
    pub fn from_lengths(parts: impl IntoIterator<Item = (usize, Style)>) -> Self {
        let mut runs = Self {
            runs: parts
                .into_iter()
                .map(|(len, style)| StyledRun::new(0, len, style))
                .collect(),
        };
        runs.normalize();
        runs
    }

    #[must_use]
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Total number of chars covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.last().map_or(0, StyledRun::end)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Style of the char at `pos`.
    #[must_use]
    pub fn style_at(&self, pos: usize) -> Option<&Style> {
        let idx = self.runs.partition_point(|run| run.end() <= pos);
        self.runs.get(idx).map(|run| &run.style)
    }

    /// Replace the style over `range`. Zero-width ranges are ignored.
    pub fn apply(&mut self, range: Range<usize>, style: Style) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.splice(
            first..last,
            std::iter::once(StyledRun::new(range.start, range.len(), style)),
        );
        self.normalize();
    }

    /// Open a gap of `len` chars at `offset` filled with `style`.
    pub fn insert(&mut self, offset: usize, len: usize, style: Style) {
        if len == 0 {
            return;
        }
        let offset = offset.min(self.len());
        let idx = self.split_at(offset);
        self.runs.insert(idx, StyledRun::new(offset, len, style));
        self.normalize();
    }

    /// Drop the chars in `range`, closing the gap.
    pub fn remove(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.drain(first..last);
        self.normalize();
    }

    /// Check the partition invariant against a text of `text_len` chars.
    #[must_use]
    pub fn validate(&self, text_len: usize) -> bool {
        let mut expected = 0;
        for run in &self.runs {
            if run.start != expected || run.len == 0 {
                return false;
            }
            expected = run.end();
        }
        expected == text_len
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len();
        range.start.min(len)..range.end.min(len).max(range.start.min(len))
    }

    /// Ensure a run boundary at `pos` and return the index of the run that
    /// starts there (`runs.len()` when `pos` is the end).
    fn split_at(&mut self, pos: usize) -> usize {
        let idx = self.runs.partition_point(|run| run.end() <= pos);
        let Some(run) = self.runs.get_mut(idx) else {
            return idx;
        };
        if run.start == pos {
            return idx;
        }
        let tail = StyledRun::new(pos, run.end() - pos, run.style.clone());
        run.len = pos - run.start;
        self.runs.insert(idx + 1, tail);
        idx + 1
    }

    /// Drop empty runs, recompute starts, merge equal neighbours.
    fn normalize(&mut self) {
        let mut merged: Vec<StyledRun> = Vec::with_capacity(self.runs.len());
        let mut start = 0;
        for run in self.runs.drain(..) {
            if run.len == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.style == run.style => last.len += run.len,
                _ => merged.push(StyledRun::new(start, run.len, run.style)),
            }
            start += run.len;
        }
        self.runs = merged;
    }
}
