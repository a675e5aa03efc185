//! Document storage and editing.
//!
//! Key types:
//!
//! - [`TextBuffer`]: Rope-backed document, tagged plain or rich
//! - [`StyleRuns`]: Run list partitioning a rich document
//! - [`EditBuffer`]: One tab's caret, selection and active style
//!
//! All offsets are char (Unicode scalar value) offsets.
//!
//! # Examples
//!
//! ```
//! use quillpad::{Style, TextBuffer};
//!
//! let mut buffer = TextBuffer::rich("Hello, world!", Style::plain());
//! buffer.apply_style(7..12, Style::plain().with_italic());
//! assert_eq!(buffer.runs().map(|r| r.len()), Some(3));
//! ```

mod buffer;
mod edit;
mod rope;
mod runs;

pub use buffer::{Styling, TextBuffer};
pub use edit::{EditBuffer, Selection};
pub use rope::RopeWrapper;
pub use runs::{StyleRuns, StyledChunk, StyledRun};
