//! Tab-to-file binding table.
//!
//! Each open tab is identified by a [`BufferId`] and bound to exactly one
//! absolute path. A path can be bound at most once: opening it again is
//! rejected with [`Error::AlreadyOpen`] rather than focusing the existing
//! tab.
//!
//! Paths are compared after [`std::path::absolute`], which resolves
//! relative paths against the working directory without touching the
//! filesystem. Symlinks are not resolved.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opaque identifier for an open tab's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Get the underlying numeric id.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Absolute form of `path` used as the binding key.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::io_at(path, e))
}

/// Bidirectional map between absolute paths and buffer ids.
#[derive(Debug, Default)]
pub struct FileBindings {
    by_path: HashMap<PathBuf, BufferId>,
    by_buffer: HashMap<BufferId, PathBuf>,
    next_id: u64,
}

impl FileBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `path` to a fresh buffer id.
    pub fn bind(&mut self, path: &Path) -> Result<BufferId> {
        let path = absolute(path)?;
        if self.by_path.contains_key(&path) {
            return Err(Error::AlreadyOpen(path));
        }
        let id = self.allocate();
        debug!(id = id.get(), path = %path.display(), "bind");
        self.by_path.insert(path.clone(), id);
        self.by_buffer.insert(id, path);
        Ok(id)
    }

    /// Remove the binding of `id` and return its path.
    pub fn unbind(&mut self, id: BufferId) -> Option<PathBuf> {
        let path = self.by_buffer.remove(&id)?;
        self.by_path.remove(&path);
        debug!(id = id.get(), path = %path.display(), "unbind");
        Some(path)
    }

    /// Replace the binding of `id` with a new binding for `path`.
    ///
    /// The old id is retired and a fresh one returned. Fails with
    /// [`Error::AlreadyOpen`] if another buffer holds `path`, and with
    /// [`Error::UnknownBuffer`] if `id` is not bound; neither failure
    /// changes the table.
    pub fn rebind(&mut self, id: BufferId, path: &Path) -> Result<BufferId> {
        let path = absolute(path)?;
        if !self.by_buffer.contains_key(&id) {
            return Err(Error::UnknownBuffer(id));
        }
        if self.by_path.get(&path).is_some_and(|&owner| owner != id) {
            return Err(Error::AlreadyOpen(path));
        }
        self.unbind(id);
        let next = self.allocate();
        debug!(old = id.get(), new = next.get(), path = %path.display(), "rebind");
        self.by_path.insert(path.clone(), next);
        self.by_buffer.insert(next, path);
        Ok(next)
    }

    /// Path bound to `id`.
    #[must_use]
    pub fn path_of(&self, id: BufferId) -> Option<&Path> {
        self.by_buffer.get(&id).map(PathBuf::as_path)
    }

    /// Buffer bound to `path`, if any.
    #[must_use]
    pub fn buffer_for(&self, path: &Path) -> Option<BufferId> {
        let path = absolute(path).ok()?;
        self.by_path.get(&path).copied()
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.buffer_for(path).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// All bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (BufferId, &Path)> {
        self.by_buffer.iter().map(|(&id, path)| (id, path.as_path()))
    }

    fn allocate(&mut self) -> BufferId {
        self.next_id += 1;
        BufferId(self.next_id)
    }
}
