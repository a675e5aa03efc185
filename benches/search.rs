//! Search, replace and style performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use quillpad::format::{read_rtf, write_rtf};
use quillpad::replace::replace_all;
use quillpad::search::{SearchMode, search};
use quillpad::{Style, TextBuffer};
use std::hint::black_box;

fn corpus() -> String {
    "the cat sat on the mat, caf\u{e9} au lait\n".repeat(2_000)
}

fn search_modes(c: &mut Criterion) {
    let text = corpus();
    let middle = text.chars().count() / 2;

    c.bench_function("search_all_80k", |b| {
        b.iter(|| search(black_box(&text), black_box("at"), SearchMode::All, 0));
    });

    c.bench_function("search_forward_from_middle", |b| {
        b.iter(|| search(black_box(&text), black_box("at"), SearchMode::Forward, middle));
    });

    c.bench_function("search_backward_from_middle", |b| {
        b.iter(|| search(black_box(&text), black_box("at"), SearchMode::Backward, middle));
    });

    c.bench_function("search_no_hits", |b| {
        b.iter(|| search(black_box(&text), black_box("zebra"), SearchMode::All, 0));
    });
}

fn replace_ops(c: &mut Criterion) {
    let text = corpus();

    c.bench_function("replace_all_string", |b| {
        b.iter(|| replace_all(black_box(&text), black_box("at"), black_box("og")));
    });

    c.bench_function("replace_all_rich_buffer", |b| {
        b.iter_batched(
            || {
                let mut buffer = TextBuffer::rich(&text, Style::default());
                buffer.apply_style(100..5_000, Style::default().with_bold());
                buffer
            },
            |mut buffer| quillpad::replace::replace_all_in(&mut buffer, "at", "og"),
            criterion::BatchSize::LargeInput,
        );
    });
}

fn style_and_rtf(c: &mut Criterion) {
    let text = corpus();
    let mut buffer = TextBuffer::rich(&text, Style::default());
    for start in (0..60_000).step_by(300) {
        buffer.apply_style(start..start + 40, Style::default().with_italic());
    }

    c.bench_function("apply_style_striped", |b| {
        b.iter_batched(
            || TextBuffer::rich(&text, Style::default()),
            |mut fresh| {
                for start in (0..60_000).step_by(300) {
                    fresh.apply_style(start..start + 40, Style::default().with_italic());
                }
                fresh
            },
            criterion::BatchSize::LargeInput,
        );
    });

    let rtf = write_rtf(&buffer, &Style::default());
    c.bench_function("rtf_write", |b| {
        b.iter(|| write_rtf(black_box(&buffer), &Style::default()));
    });
    c.bench_function("rtf_read", |b| {
        b.iter(|| read_rtf(black_box(rtf.as_bytes()), &Style::default()));
    });
}

criterion_group!(benches, search_modes, replace_ops, style_and_rtf);
criterion_main!(benches);
