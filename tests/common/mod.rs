#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use std::fs;
use std::path::PathBuf;
use std::sync::Once;

use quillpad::{BufferId, Session};
use tempfile::TempDir;

pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A scratch directory with a session rooted in it.
pub struct Workspace {
    pub dir: TempDir,
    pub session: Session,
}

impl Workspace {
    pub fn new() -> Self {
        setup_test_logging();
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
            session: Session::default(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name` without opening it.
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read back")
    }

    /// Write `contents` to `name` and open it.
    pub fn open(&mut self, name: &str, contents: &str) -> BufferId {
        let path = self.write(name, contents.as_bytes());
        self.session.open_document(&path).expect("open document")
    }
}

/// Load a file from `tests/fixtures`.
pub fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("missing fixture {}: {e}", path.display()))
}
