//! Fuzz target for the RTF reader.
//!
//! Documents come from disk and may be hand-edited or truncated, so the
//! reader must reject or accept any byte sequence without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quillpad::Style;
use quillpad::format::{read_rtf, write_rtf};

fuzz_target!(|data: &[u8]| {
    let base = Style::default();
    let Ok(buffer) = read_rtf(data, &base) else {
        return;
    };

    if let Some(runs) = buffer.runs() {
        let covered: usize = runs.iter().map(|run| run.len).sum();
        assert_eq!(covered, buffer.len_chars(), "runs must cover the text");
    }

    // Whatever was read must survive a write/read cycle unchanged
    let rewritten = write_rtf(&buffer, &base);
    let again = read_rtf(rewritten.as_bytes(), &base).expect("own output must parse");
    assert!(again.same_content(&buffer), "round trip changed the document");
});
