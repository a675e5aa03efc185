//! Fuzz target for search and replace on arbitrary Unicode text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quillpad::replace::{replace_all, replace_one};
use quillpad::search::{Direction, SearchMode, search};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    query: &'a str,
    replacement: &'a str,
    caret: u16,
    end: u16,
    backward: bool,
}

fuzz_target!(|input: Input<'_>| {
    let caret = usize::from(input.caret);
    let mode = if input.backward {
        SearchMode::Backward
    } else {
        SearchMode::Forward
    };

    let mut matches = search(input.text, input.query, mode, caret);
    let len = input.text.chars().count();
    for _ in 0..matches.len() {
        let offset = matches.advance(Direction::Next).expect("non-empty set");
        assert!(offset + input.query.chars().count() <= len);
    }

    let _ = replace_all(input.text, input.query, input.replacement);
    let _ = replace_one(
        input.text,
        caret,
        usize::from(input.end),
        input.query,
        input.replacement,
    );
});
