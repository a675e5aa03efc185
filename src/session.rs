//! Editing session: open tabs, their file bindings, and the shell commands.
//!
//! A [`Session`] is the explicit owner of everything one editor window
//! used to keep around: the [`FileBindings`] table, one [`Tab`] per open
//! document, and the current [`MatchSet`] of each tab. The shell decodes a
//! UI event into one of the command methods below and calls it
//! synchronously. Commands either complete or return an [`Error`] without
//! changing session state; [`Error::notice`] turns that error into the
//! dialog content.
//!
//! # Examples
//!
//! ```no_run
//! use quillpad::search::SearchMode;
//! use quillpad::session::{CloseChoice, FindOutcome, Session};
//!
//! let mut session = Session::default();
//! let id = session.open_document("notes.txt".as_ref())?;
//! if let FindOutcome::NotFound(notice) = session.find(id, "todo", SearchMode::All)? {
//!     println!("{}", notice.message());
//! }
//! session.close_tab(id, |_| CloseChoice::Save)?;
//! # Ok::<(), quillpad::Error>(())
//! ```

use crate::binding::{self, BufferId, FileBindings};
use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::format::{self, Format};
use crate::notice::Notice;
use crate::replace::{replace_all_in, replace_in_selection};
use crate::search::{Direction, MatchSet, SearchMode, search};
use crate::style::Style;
use crate::text::{EditBuffer, TextBuffer};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The user's answer to an unsaved-changes prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseChoice {
    Save,
    Discard,
    Cancel,
}

/// What [`Session::close_tab`] ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab had no unsaved changes and was closed.
    Closed,
    /// Changes were saved, then the tab was closed.
    Saved,
    /// Changes were dropped and the tab was closed.
    Discarded,
    /// The close was cancelled; the tab and its binding remain.
    Cancelled,
}

/// Result of [`Session::find`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FindOutcome {
    /// The first match in scan order is now selected.
    Found {
        offset: usize,
        len: usize,
        total: usize,
    },
    /// Nothing matched; show the notice.
    NotFound(Notice),
}

/// One open document.
#[derive(Debug)]
pub struct Tab {
    path: PathBuf,
    format: Format,
    edit: EditBuffer,
    matches: Option<MatchSet>,
}

impl Tab {
    fn new(path: PathBuf, format: Format, buffer: TextBuffer, config: &EditorConfig) -> Self {
        let mut edit = EditBuffer::new(buffer);
        edit.set_active_style(config.default_style.clone());
        Self {
            path,
            format,
            edit,
            matches: None,
        }
    }

    /// Absolute path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub fn edit(&self) -> &EditBuffer {
        &self.edit
    }

    pub fn edit_mut(&mut self) -> &mut EditBuffer {
        &mut self.edit
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        self.edit.buffer()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.edit.text()
    }

    /// Matches of the last `find` in this tab.
    #[must_use]
    pub fn matches(&self) -> Option<&MatchSet> {
        self.matches.as_ref()
    }

    /// Select the current match, clamped to the text, and return it.
    fn select_current(&mut self) -> Option<(usize, usize)> {
        let (offset, len) = self.matches.as_ref()?.selected()?;
        let range = self.edit.buffer().rope().clamp_range(offset..offset + len);
        self.edit.select(range.clone());
        Some((range.start, range.len()))
    }
}

/// Open tabs plus the binding table that ties them to files.
#[derive(Debug, Default)]
pub struct Session {
    config: EditorConfig,
    bindings: FileBindings,
    tabs: BTreeMap<BufferId, Tab>,
}

impl Session {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            bindings: FileBindings::new(),
            tabs: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn bindings(&self) -> &FileBindings {
        &self.bindings
    }

    #[must_use]
    pub fn tab(&self, id: BufferId) -> Option<&Tab> {
        self.tabs.get(&id)
    }

    pub fn tab_mut(&mut self, id: BufferId) -> Option<&mut Tab> {
        self.tabs.get_mut(&id)
    }

    /// Open tabs in the order they were opened.
    pub fn tabs(&self) -> impl Iterator<Item = (BufferId, &Tab)> {
        self.tabs.iter().map(|(&id, tab)| (id, tab))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Create an empty document at `path` and open it in a new tab.
    ///
    /// The default extension is added when `path` has none. Fails with
    /// [`Error::AlreadyExists`] if the file exists; existing files are
    /// never truncated.
    pub fn new_document(&mut self, path: &Path) -> Result<BufferId> {
        let path = binding::absolute(&self.config.with_extension_if_missing(path))?;
        if self.bindings.contains(&path) {
            return Err(Error::AlreadyOpen(path));
        }

        let format = Format::for_path(&path, &self.config);
        let buffer = match format {
            Format::PlainText => TextBuffer::plain(""),
            Format::Rtf => TextBuffer::rich("", self.config.default_style.clone()),
        };
        let bytes = format::encode(&buffer, format, &path, &self.config)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => Error::AlreadyExists(path.clone()),
                _ => Error::io_at(&path, e),
            })
            .inspect_err(|err| warn!(path = %path.display(), %err, "new document failed"))?;
        if let Err(e) = file.write_all(&bytes) {
            // Leave no half-written file behind
            let _ = fs::remove_file(&path);
            return Err(Error::io_at(&path, e));
        }

        let id = self.bindings.bind(&path)?;
        info!(id = id.get(), path = %path.display(), ?format, "new document");
        self.tabs
            .insert(id, Tab::new(path, format, buffer, &self.config));
        Ok(id)
    }

    /// Load `path` into a new tab.
    ///
    /// A path that is already open is rejected with [`Error::AlreadyOpen`]
    /// before the file is read.
    pub fn open_document(&mut self, path: &Path) -> Result<BufferId> {
        let path = binding::absolute(path)?;
        if self.bindings.contains(&path) {
            warn!(path = %path.display(), "already open");
            return Err(Error::AlreadyOpen(path));
        }

        let buffer = format::load(&path, &self.config)
            .inspect_err(|err| warn!(path = %path.display(), %err, "open failed"))?;
        let format = Format::for_path(&path, &self.config);
        let id = self.bindings.bind(&path)?;
        info!(
            id = id.get(),
            path = %path.display(),
            ?format,
            chars = buffer.len_chars(),
            "opened document"
        );
        self.tabs
            .insert(id, Tab::new(path, format, buffer, &self.config));
        Ok(id)
    }

    /// Write the tab's buffer to its bound file.
    pub fn save(&mut self, id: BufferId) -> Result<()> {
        let tab = self.tabs.get(&id).ok_or(Error::UnknownBuffer(id))?;
        format::save(tab.buffer(), &tab.path, &self.config)?;
        info!(id = id.get(), path = %tab.path.display(), "saved");
        Ok(())
    }

    /// Write the tab to `path`, then reopen it from there.
    ///
    /// The old binding is dropped and the document is reloaded from the new
    /// file into a tab with a fresh [`BufferId`], which is returned. The
    /// default extension is added when `path` has none. If `path` is bound
    /// to another tab the command fails with [`Error::AlreadyOpen`] before
    /// anything is written.
    pub fn save_as(&mut self, id: BufferId, path: &Path) -> Result<BufferId> {
        let path = binding::absolute(&self.config.with_extension_if_missing(path))?;
        let tab = self.tabs.get(&id).ok_or(Error::UnknownBuffer(id))?;
        if self.bindings.buffer_for(&path).is_some_and(|owner| owner != id) {
            warn!(id = id.get(), path = %path.display(), "save as target already open");
            return Err(Error::AlreadyOpen(path));
        }

        format::save(tab.buffer(), &path, &self.config)?;
        let buffer = format::load(&path, &self.config)?;
        let format = Format::for_path(&path, &self.config);

        let next = self.bindings.rebind(id, &path)?;
        self.tabs.remove(&id);
        info!(old = id.get(), new = next.get(), path = %path.display(), "saved as");
        self.tabs
            .insert(next, Tab::new(path, format, buffer, &self.config));
        Ok(next)
    }

    /// Whether the tab differs from its file on disk.
    ///
    /// The file bytes are compared with what a save would write. When they
    /// differ, as for CRLF files or RTF written by another program, the
    /// file is decoded and compared by content. A file that is missing or
    /// no longer decodes counts as modified.
    pub fn is_modified(&self, id: BufferId) -> Result<bool> {
        let tab = self.tabs.get(&id).ok_or(Error::UnknownBuffer(id))?;
        let on_disk = match fs::read(&tab.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(id = id.get(), %err, "disk copy unreadable, treating as modified");
                return Ok(true);
            }
        };

        let encoded = format::encode(tab.buffer(), tab.format, &tab.path, &self.config);
        if encoded.is_ok_and(|bytes| bytes == on_disk) {
            return Ok(false);
        }

        match format::decode(&on_disk, tab.format, &tab.path, &self.config) {
            Ok(decoded) => Ok(!decoded.same_content(tab.buffer())),
            Err(err) => {
                debug!(id = id.get(), %err, "disk copy no longer decodes, treating as modified");
                Ok(true)
            }
        }
    }

    /// Close a tab, asking `decide` what to do if it has unsaved changes.
    ///
    /// `decide` is only called for a modified tab and receives a
    /// [`Notice::UnsavedChanges`]. On [`CloseChoice::Cancel`], or when the
    /// save fails, the tab stays open and bound.
    pub fn close_tab<F>(&mut self, id: BufferId, decide: F) -> Result<CloseOutcome>
    where
        F: FnOnce(&Notice) -> CloseChoice,
    {
        let outcome = if self.is_modified(id)? {
            let path = self.bindings.path_of(id).map(Path::to_path_buf).unwrap_or_default();
            match decide(&Notice::UnsavedChanges { path }) {
                CloseChoice::Save => {
                    self.save(id)?;
                    CloseOutcome::Saved
                }
                CloseChoice::Discard => CloseOutcome::Discarded,
                CloseChoice::Cancel => {
                    debug!(id = id.get(), "close cancelled");
                    return Ok(CloseOutcome::Cancelled);
                }
            }
        } else {
            CloseOutcome::Closed
        };

        self.tabs.remove(&id);
        self.bindings.unbind(id);
        info!(id = id.get(), ?outcome, "closed tab");
        Ok(outcome)
    }

    /// Search the tab from its caret and select the first match.
    ///
    /// Every call recomputes the match list from the current caret and
    /// `mode`; the previous list is dropped. Backward searches start at the
    /// selection start instead, so repeating one steps past the match it
    /// just selected.
    pub fn find(&mut self, id: BufferId, query: &str, mode: SearchMode) -> Result<FindOutcome> {
        let tab = self.tab_entry(id)?;
        let origin = match mode {
            SearchMode::Backward => tab
                .edit
                .selection_range()
                .map_or_else(|| tab.edit.caret(), |range| range.start),
            SearchMode::Forward | SearchMode::All => tab.edit.caret(),
        };
        let matches = search(&tab.text(), query, mode, origin);
        let total = matches.len();
        tab.matches = Some(matches);

        match tab.select_current() {
            Some((offset, len)) => Ok(FindOutcome::Found { offset, len, total }),
            None => {
                debug!(id = id.get(), query, "no results");
                Ok(FindOutcome::NotFound(Notice::NoResults {
                    query: query.to_string(),
                }))
            }
        }
    }

    /// Select the next match of the last `find`, wrapping at the end.
    ///
    /// Returns the selected `(offset, len)`, or `None` without a match list.
    pub fn next_match(&mut self, id: BufferId) -> Result<Option<(usize, usize)>> {
        self.step_match(id, Direction::Next)
    }

    /// Select the previous match of the last `find`, wrapping at the start.
    pub fn prev_match(&mut self, id: BufferId) -> Result<Option<(usize, usize)>> {
        self.step_match(id, Direction::Previous)
    }

    fn step_match(&mut self, id: BufferId, direction: Direction) -> Result<Option<(usize, usize)>> {
        let tab = self.tab_entry(id)?;
        let Some(matches) = tab.matches.as_mut() else {
            return Ok(None);
        };
        matches.advance(direction);
        Ok(tab.select_current())
    }

    /// Replace the first `query` inside the tab's selection.
    pub fn replace(&mut self, id: BufferId, query: &str, replacement: &str) -> Result<bool> {
        let tab = self.tab_entry(id)?;
        let replaced = replace_in_selection(&mut tab.edit, query, replacement);
        debug!(id = id.get(), query, replaced, "replace");
        Ok(replaced)
    }

    /// Replace every `query` in the tab and return the count.
    pub fn replace_all(&mut self, id: BufferId, query: &str, replacement: &str) -> Result<usize> {
        let tab = self.tab_entry(id)?;
        let caret = tab.edit.caret();
        let count = replace_all_in(tab.edit.buffer_mut(), query, replacement);
        tab.edit.set_caret(caret);
        debug!(id = id.get(), query, count, "replace all");
        Ok(count)
    }

    /// Set the style over a char range of a rich tab.
    ///
    /// Plain tabs fail with [`Error::PlainDocument`]. An empty range is a
    /// no-op.
    pub fn apply_style(&mut self, id: BufferId, range: Range<usize>, style: Style) -> Result<()> {
        let tab = self.tab_entry(id)?;
        if !tab.edit.buffer_mut().apply_style(range.clone(), style) {
            return Err(Error::PlainDocument(id));
        }
        debug!(id = id.get(), ?range, "applied style");
        Ok(())
    }

    /// Set the style stamped onto text typed into the tab.
    pub fn set_active_style(&mut self, id: BufferId, style: Style) -> Result<()> {
        self.tab_entry(id)?.edit.set_active_style(style);
        Ok(())
    }

    /// Type `text` at the tab's caret, replacing any selection.
    pub fn type_text(&mut self, id: BufferId, text: &str) -> Result<()> {
        self.tab_entry(id)?.edit.insert_str(text);
        Ok(())
    }

    fn tab_entry(&mut self, id: BufferId) -> Result<&mut Tab> {
        self.tabs.get_mut(&id).ok_or(Error::UnknownBuffer(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(name: &str, contents: &str) -> (tempfile::TempDir, Session, BufferId) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        let mut session = Session::default();
        let id = session.open_document(&path).unwrap();
        (dir, session, id)
    }

    #[test]
    fn test_open_twice_rejected() {
        let (dir, mut session, _) = session_with("a.txt", "hello\n");
        let err = session.open_document(&dir.path().join("a.txt")).unwrap_err();
        assert!(matches!(err, Error::AlreadyOpen(_)));
        assert_eq!(session.len(), 1);
        assert_eq!(session.bindings().len(), 1);
    }

    #[test]
    fn test_saved_text_without_newline_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        let id = session.new_document(&dir.path().join("memo.txt")).unwrap();
        session.type_text(id, "hello").unwrap();
        assert!(session.is_modified(id).unwrap());

        session.save(id).unwrap();
        assert!(!session.is_modified(id).unwrap());
        let outcome = session
            .close_tab(id, |n| panic!("unexpected prompt: {n:?}"))
            .unwrap();
        assert_eq!(outcome, CloseOutcome::Closed);
        assert_eq!(fs::read_to_string(dir.path().join("memo.txt")).unwrap(), "hello");
    }

    #[test]
    fn test_crlf_file_unedited_is_clean() {
        let (_dir, session, id) = session_with("dos.txt", "one\r\ntwo\r\n");
        assert_eq!(session.tab(id).unwrap().text(), "one\ntwo\n");
        assert!(!session.is_modified(id).unwrap());
    }

    #[test]
    fn test_find_and_navigate() {
        let (_dir, mut session, id) = session_with("a.txt", "the cat sat on the mat");
        let found = session.find(id, "at", SearchMode::All).unwrap();
        assert_eq!(
            found,
            FindOutcome::Found {
                offset: 5,
                len: 2,
                total: 3
            }
        );
        assert_eq!(session.tab(id).unwrap().edit().selection_range(), Some(5..7));
        assert_eq!(session.next_match(id).unwrap(), Some((9, 2)));
        assert_eq!(session.prev_match(id).unwrap(), Some((5, 2)));
        assert_eq!(session.prev_match(id).unwrap(), Some((20, 2)));
        assert_eq!(session.tab(id).unwrap().edit().caret(), 22);
    }

    #[test]
    fn test_find_recomputes_from_caret() {
        let (_dir, mut session, id) = session_with("a.txt", "the cat sat on the mat");
        session.tab_mut(id).unwrap().edit_mut().set_caret(10);
        let found = session.find(id, "at", SearchMode::Forward).unwrap();
        assert!(matches!(found, FindOutcome::Found { offset: 20, total: 1, .. }));
        // "mat" is selected; backward starts before it
        let found = session.find(id, "at", SearchMode::Backward).unwrap();
        assert!(matches!(found, FindOutcome::Found { offset: 9, total: 2, .. }));
    }

    #[test]
    fn test_repeated_backward_find_moves_on() {
        let (_dir, mut session, id) = session_with("a.txt", "the cat sat on the mat");
        session.tab_mut(id).unwrap().edit_mut().set_caret(22);
        let offsets: Vec<_> = (0..4)
            .map(|_| match session.find(id, "at", SearchMode::Backward).unwrap() {
                FindOutcome::Found { offset, .. } => Some(offset),
                FindOutcome::NotFound(_) => None,
            })
            .collect();
        assert_eq!(offsets, vec![Some(20), Some(9), Some(5), None]);
    }

    #[test]
    fn test_find_nothing_is_notice() {
        let (_dir, mut session, id) = session_with("a.txt", "abc");
        let found = session.find(id, "zzz", SearchMode::All).unwrap();
        assert_eq!(
            found,
            FindOutcome::NotFound(Notice::NoResults {
                query: "zzz".into()
            })
        );
        assert_eq!(session.next_match(id).unwrap(), None);
    }

    #[test]
    fn test_stale_matches_are_clamped() {
        let (_dir, mut session, id) = session_with("a.txt", "xx ab ab");
        session.find(id, "ab", SearchMode::All).unwrap();
        session.replace_all(id, "ab", "").unwrap();
        assert_eq!(session.tab(id).unwrap().text(), "xx  ");
        let selected = session.next_match(id).unwrap();
        assert_eq!(selected, Some((4, 0)));
    }

    #[test]
    fn test_styling_plain_tab_fails() {
        let (_dir, mut session, id) = session_with("a.txt", "abc");
        let err = session
            .apply_style(id, 0..2, Style::plain().with_bold())
            .unwrap_err();
        assert!(matches!(err, Error::PlainDocument(e) if e == id));
    }

    #[test]
    fn test_unknown_buffer() {
        let (_dir, mut session, id) = session_with("a.txt", "abc");
        session.close_tab(id, |_| CloseChoice::Cancel).unwrap();
        assert!(matches!(session.save(id), Err(Error::UnknownBuffer(_))));
        assert!(matches!(
            session.type_text(id, "x"),
            Err(Error::UnknownBuffer(_))
        ));
    }
}
