//! Literal find-and-replace.
//!
//! The string functions mirror the buffer-level ones: [`replace_one`] and
//! [`replace_all`] operate on plain strings, while [`replace_in_selection`]
//! and [`replace_all_in`] edit a [`TextBuffer`] in place so rich documents
//! keep their styled runs. Both share the search module's matching rules:
//! the query is literal, matches are non-overlapping and found left to
//! right.
//!
//! An empty query never matches; every function returns its input
//! unchanged for it.

use crate::search::{find_all, scan_forward};
use crate::text::{EditBuffer, TextBuffer};

/// Replace the first occurrence of `query` inside the char range
/// `[start, end)` and leave everything else as is.
///
/// Bounds are clamped to the text and swapped when reversed.
#[must_use]
pub fn replace_one(text: &str, start: usize, end: usize, query: &str, replacement: &str) -> String {
    let (start, end) = (start.min(end), start.max(end));
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end);
    let selected = &text[start_byte..end_byte];

    let Some(found) = selected.find(query).filter(|_| !query.is_empty()) else {
        return text.to_string();
    };

    let at = start_byte + found;
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..at]);
    out.push_str(replacement);
    out.push_str(&text[at + query.len()..]);
    out
}

/// Replace every non-overlapping occurrence of `query`, left to right.
#[must_use]
pub fn replace_all(text: &str, query: &str, replacement: &str) -> String {
    let hits = scan_forward(text, query, 0);
    if hits.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for at in hits {
        out.push_str(&text[last..at]);
        out.push_str(replacement);
        last = at + query.len();
    }
    out.push_str(&text[last..]);
    out
}

/// Replace the first occurrence of `query` inside the current selection.
///
/// The selection is stretched or shrunk to cover the same span with the
/// new text. Returns `false` when there is no selection or no match in it.
pub fn replace_in_selection(edit: &mut EditBuffer, query: &str, replacement: &str) -> bool {
    let Some(range) = edit.selection_range() else {
        return false;
    };
    let selected = edit.buffer().slice(range.clone());
    let Some(&hit) = find_all(&selected, query).first() else {
        return false;
    };

    let at = range.start + hit;
    let query_len = query.chars().count();
    edit.buffer_mut().splice(at..at + query_len, replacement);

    let new_end = range.end - query_len + replacement.chars().count();
    edit.select(range.start..new_end);
    true
}

/// Replace every occurrence of `query` in the buffer and return the count.
pub fn replace_all_in(buffer: &mut TextBuffer, query: &str, replacement: &str) -> usize {
    let hits = find_all(&buffer.text(), query);
    let query_len = query.chars().count();
    // Back to front so earlier offsets stay valid.
    for &at in hits.iter().rev() {
        buffer.splice(at..at + query_len, replacement);
    }
    hits.len()
}

fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchMode, search};
    use crate::style::Style;
    use crate::text::StyledChunk;

    #[test]
    fn test_replace_all_scenario() {
        assert_eq!(
            replace_all("the cat sat on the mat", "at", "og"),
            "the cog sog on the mog"
        );
    }

    #[test]
    fn test_replace_all_then_search_is_empty() {
        let replaced = replace_all("abcabcab", "ab", "x");
        assert_eq!(replaced, "xcxcx");
        assert!(search(&replaced, "ab", SearchMode::All, 0).is_empty());
    }

    #[test]
    fn test_replace_all_empty_query_is_noop() {
        assert_eq!(replace_all("abc", "", "x"), "abc");
        assert_eq!(replace_one("abc", 0, 3, "", "x"), "abc");
    }

    #[test]
    fn test_replace_one_only_inside_selection() {
        let text = "cat cat cat";
        assert_eq!(replace_one(text, 4, 11, "cat", "dog"), "cat dog cat");
        // Selection cuts the occurrence in half: nothing to replace
        assert_eq!(replace_one(text, 5, 7, "cat", "dog"), text);
        // Reversed and out-of-range bounds
        assert_eq!(replace_one(text, 99, 8, "cat", "dog"), "cat cat dog");
    }

    #[test]
    fn test_replace_one_multibyte() {
        assert_eq!(replace_one("ünï ünï", 3, 7, "ünï", "x"), "ünï x");
    }

    #[test]
    fn test_literal_pattern() {
        assert_eq!(replace_all("1+1=2", "1+1", "2"), "2=2");
        assert_eq!(replace_all("a$b", "$", "\\"), "a\\b");
    }

    #[test]
    fn test_replace_in_selection_updates_selection() {
        let mut edit = EditBuffer::with_text("one cat two cat");
        edit.select(4..15);
        assert!(replace_in_selection(&mut edit, "cat", "tiger"));
        assert_eq!(edit.text(), "one tiger two cat");
        assert_eq!(edit.selection_range(), Some(4..17));

        edit.select(0..3);
        assert!(!replace_in_selection(&mut edit, "cat", "tiger"));
        assert_eq!(edit.text(), "one tiger two cat");
    }

    #[test]
    fn test_buffer_and_string_paths_agree() {
        let text = "a-b-c--d";
        let mut buffer = TextBuffer::plain(text);
        assert_eq!(replace_all_in(&mut buffer, "-", "+="), 4);
        assert_eq!(buffer.text(), replace_all(text, "-", "+="));

        let mut edit = EditBuffer::with_text(text);
        edit.select(2..8);
        replace_in_selection(&mut edit, "--", "~");
        assert_eq!(edit.text(), replace_one(text, 2, 8, "--", "~"));
    }

    #[test]
    fn test_replace_all_in_keeps_runs() {
        let mut buffer = TextBuffer::from_chunks(&[
            StyledChunk::plain("cat "),
            StyledChunk::new("cat", Style::plain().with_bold()),
        ]);
        assert_eq!(replace_all_in(&mut buffer, "cat", "dog"), 2);
        assert_eq!(buffer.text(), "dog dog");
        assert!(buffer.style_at(0).is_some_and(|s| !s.is_bold()));
        assert!(buffer.style_at(4).is_some_and(Style::is_bold));
        assert!(buffer.style_at(6).is_some_and(Style::is_bold));
    }
}
