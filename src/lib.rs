//! `quillpad` - Core of a multi-tab plain and rich text editor
//!
//! Documents live in rope-backed buffers that are either plain text or
//! carry a partition of styled runs. On top of them sit literal
//! search/replace with a navigable match list, a style engine with
//! replace semantics, plain-text and RTF persistence, and a [`Session`]
//! that binds tabs to files and exposes the commands an editor shell
//! dispatches to.
//!
//! The crate has no UI. The shell renders buffer state and shows the
//! [`Notice`]s that commands hand back.

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // RTF numeric parameters
#![allow(clippy::cast_sign_loss)] // RTF numeric parameters
#![allow(clippy::cast_possible_wrap)] // \uN takes a signed 16-bit value
#![allow(clippy::module_name_repetitions)] // Allow StyleRuns, StyledRun etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod binding;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod notice;
pub mod replace;
pub mod search;
pub mod session;
pub mod style;
pub mod text;

// Re-export core types at crate root
pub use binding::{BufferId, FileBindings};
pub use color::Rgb;
pub use config::EditorConfig;
pub use error::{Error, Result};
pub use notice::{Notice, NoticeLevel};
pub use style::{Style, StyleBuilder, TextAttributes};

// Re-export text types
pub use text::{EditBuffer, Selection, StyleRuns, StyledChunk, StyledRun, Styling, TextBuffer};

// Re-export search, persistence and session types
pub use format::Format;
pub use search::{Direction, MatchSet, SearchMode};
pub use session::{CloseChoice, CloseOutcome, FindOutcome, Session, Tab};
