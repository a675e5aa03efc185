//! RTF reader and writer.
//!
//! Covers the character-formatting subset the editor produces: font table,
//! color table, `\f`, `\fs`, `\cf`, `\cb`/`\highlight`, `\b`, `\i`,
//! `\plain`, `\par`/`\line`, `\tab` and `\u` escapes. Ignorable (`\*`) and
//! unknown metadata destinations are skipped. Everything written by
//! [`write_rtf`] reads back to the same text and runs.
//!
//! `\'hh` escapes are decoded as Windows-1252 unless `\ansicpg` names
//! another code page, in which case bytes map to Latin-1.

// One match arm per control word reads better than merged arms
#![allow(clippy::match_same_arms)]

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::style::{Style, TextAttributes};
use crate::text::{StyledChunk, TextBuffer};

/// Destinations whose content is metadata, not document text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "info",
    "stylesheet",
    "pict",
    "header",
    "footer",
    "headerl",
    "headerr",
    "footerl",
    "footerr",
    "object",
    "listtable",
    "listoverridetable",
    "generator",
    "themedata",
    "colorschememapping",
    "latentstyles",
    "rsidtbl",
    "xmlnstbl",
    "mmathPr",
];

/// Code page assumed for `\'hh` escapes when the header names none.
const DEFAULT_CODEPAGE: u32 = 1252;

/// Windows-1252 chars for bytes `0x80..=0x9F`. Gaps decode as Latin-1.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20ac}'),
    None,
    Some('\u{201a}'),
    Some('\u{0192}'),
    Some('\u{201e}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02c6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017d}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201c}'),
    Some('\u{201d}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02dc}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203a}'),
    Some('\u{0153}'),
    None,
    Some('\u{017e}'),
    Some('\u{0178}'),
];

/// Decode one `\'hh` byte under `codepage`.
fn decode_ansi(byte: u8, codepage: u32) -> char {
    let high = match byte {
        0x80..=0x9f if codepage == 1252 => CP1252_HIGH[usize::from(byte - 0x80)],
        _ => None,
    };
    high.unwrap_or_else(|| char::from(byte))
}

/// Serialize a buffer as RTF.
///
/// Plain buffers are written with `base` for every char.
#[must_use]
pub fn write_rtf(buffer: &TextBuffer, base: &Style) -> String {
    let text = buffer.text();
    let spans: Vec<(&str, &Style)> = match buffer.runs() {
        Some(runs) => {
            let bounds: Vec<usize> = text
                .char_indices()
                .map(|(byte, _)| byte)
                .chain(std::iter::once(text.len()))
                .collect();
            let byte_at = |char_idx: usize| bounds[char_idx.min(bounds.len() - 1)];
            runs.iter()
                .map(|run| (&text[byte_at(run.start)..byte_at(run.end())], &run.style))
                .collect()
        }
        None => vec![(text.as_str(), base)],
    };

    let mut writer = RtfWriter::default();
    for (_, style) in &spans {
        writer.register(style);
    }
    writer.write_header();
    for (chunk, style) in spans {
        writer.write_span(chunk, style);
    }
    writer.finish()
}

/// Parse RTF into a rich buffer.
///
/// `base` supplies the font family when the font table has no entry for
/// the selected font.
pub fn read_rtf(input: &[u8], base: &Style) -> Result<TextBuffer> {
    let mut reader = RtfReader::new(input, base);
    reader.parse()?;
    let chunks: Vec<StyledChunk<'_>> = reader
        .chunks
        .iter()
        .map(|(text, style)| StyledChunk::new(text, style.clone()))
        .collect();
    Ok(TextBuffer::from_chunks(&chunks))
}

/// Writes RTF, emitting control words only when a property changes.
#[derive(Default)]
struct RtfWriter {
    out: String,
    fonts: Vec<String>,
    colors: Vec<Rgb>,
    current: Option<Style>,
}

impl RtfWriter {
    fn register(&mut self, style: &Style) {
        if !self.fonts.iter().any(|f| f == style.family()) {
            self.fonts.push(style.family().to_string());
        }
        for color in [style.fg, style.bg] {
            if !self.colors.contains(&color) {
                self.colors.push(color);
            }
        }
    }

    fn font_index(&self, family: &str) -> usize {
        self.fonts.iter().position(|f| f == family).unwrap_or(0)
    }

    /// Color table index; entry 0 is the "auto" color.
    fn color_index(&self, color: Rgb) -> usize {
        self.colors.iter().position(|c| *c == color).map_or(0, |i| i + 1)
    }

    fn write_header(&mut self) {
        self.out.push_str("{\\rtf1\\ansi\\ansicpg1252\\uc1\\deff0\n{\\fonttbl");
        for (idx, family) in self.fonts.iter().enumerate() {
            self.out.push_str(&format!("{{\\f{idx}\\fnil "));
            for ch in family.chars() {
                push_escaped(&mut self.out, ch);
            }
            self.out.push_str(";}");
        }
        self.out.push_str("}\n{\\colortbl;");
        for color in &self.colors {
            self.out.push_str(&format!(
                "\\red{}\\green{}\\blue{};",
                color.r, color.g, color.b
            ));
        }
        self.out.push_str("}\n");
    }

    fn write_span(&mut self, text: &str, style: &Style) {
        if text.is_empty() {
            return;
        }
        self.switch_style(style);
        for ch in text.chars() {
            match ch {
                '\n' => self.out.push_str("\\par\n"),
                '\t' => self.out.push_str("\\tab "),
                _ => push_escaped(&mut self.out, ch),
            }
        }
    }

    fn switch_style(&mut self, style: &Style) {
        let prev = self.current.take();
        let mut words = String::new();

        if prev.as_ref().is_none_or(|p| p.family() != style.family()) {
            words.push_str(&format!("\\f{}", self.font_index(style.family())));
        }
        if prev.as_ref().is_none_or(|p| p.size() != style.size()) {
            words.push_str(&format!("\\fs{}", u32::from(style.size()) * 2));
        }
        if prev.as_ref().is_none_or(|p| p.fg != style.fg) {
            words.push_str(&format!("\\cf{}", self.color_index(style.fg)));
        }
        if prev.as_ref().is_none_or(|p| p.bg != style.bg) {
            words.push_str(&format!("\\cb{}", self.color_index(style.bg)));
        }
        if prev.as_ref().is_none_or(|p| p.is_bold() != style.is_bold()) {
            words.push_str(if style.is_bold() { "\\b" } else { "\\b0" });
        }
        if prev.as_ref().is_none_or(|p| p.is_italic() != style.is_italic()) {
            words.push_str(if style.is_italic() { "\\i" } else { "\\i0" });
        }
        if !words.is_empty() {
            self.out.push_str(&words);
            self.out.push(' ');
        }
        self.current = Some(style.clone());
    }

    fn finish(mut self) -> String {
        self.out.push('}');
        self.out
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' | '{' | '}' => {
            out.push('\\');
            out.push(ch);
        }
        ' '..='~' => out.push(ch),
        _ => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                // RTF takes signed 16-bit values
                out.push_str(&format!("\\u{}?", *unit as i16));
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Destination {
    Body,
    FontTable,
    ColorTable,
    Skip,
}

/// Character properties tracked per group.
#[derive(Clone, Debug)]
struct GroupState {
    dest: Destination,
    font: usize,
    half_points: u32,
    fg: usize,
    bg: usize,
    attributes: TextAttributes,
    /// Fallback chars to skip after `\u`.
    uc: usize,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            dest: Destination::Body,
            font: 0,
            half_points: 24,
            fg: 0,
            bg: 0,
            attributes: TextAttributes::empty(),
            uc: 1,
        }
    }
}

struct RtfReader<'a> {
    input: &'a [u8],
    pos: usize,
    base: &'a Style,
    state: GroupState,
    stack: Vec<GroupState>,
    /// Set right after `{` so the next control word can name a destination.
    group_start: bool,
    fonts: Vec<(usize, String)>,
    font_num: usize,
    font_name: String,
    colors: Vec<Option<Rgb>>,
    color: (Option<u8>, Option<u8>, Option<u8>),
    pending_high: Option<u16>,
    skip_fallback: usize,
    codepage: u32,
    chunks: Vec<(String, Style)>,
}

impl<'a> RtfReader<'a> {
    fn new(input: &'a [u8], base: &'a Style) -> Self {
        Self {
            input,
            pos: 0,
            base,
            state: GroupState::default(),
            stack: Vec::new(),
            group_start: false,
            fonts: Vec::new(),
            font_num: 0,
            font_name: String::new(),
            colors: Vec::new(),
            color: (None, None, None),
            pending_high: None,
            skip_fallback: 0,
            codepage: DEFAULT_CODEPAGE,
            chunks: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<()> {
        let header = self.input.iter().position(|b| !b.is_ascii_whitespace());
        if !header.is_some_and(|start| self.input[start..].starts_with(b"{\\rtf")) {
            return Err(Error::InvalidRtf("missing {\\rtf header".to_string()));
        }

        while let Some(&byte) = self.input.get(self.pos) {
            self.pos += 1;
            match byte {
                b'{' => {
                    self.stack.push(self.state.clone());
                    self.group_start = true;
                    continue;
                }
                b'}' => {
                    self.end_group()?;
                    if self.stack.is_empty() {
                        return Ok(());
                    }
                }
                b'\\' => self.control()?,
                b'\r' | b'\n' => {}
                _ => self.text(char::from(byte)),
            }
            self.group_start = false;
        }

        Err(Error::InvalidRtf("unterminated group".to_string()))
    }

    fn end_group(&mut self) -> Result<()> {
        if self.state.dest == Destination::FontTable && !self.font_name.is_empty() {
            self.push_font();
        }
        self.state = self
            .stack
            .pop()
            .ok_or_else(|| Error::InvalidRtf("unbalanced '}'".to_string()))?;
        Ok(())
    }

    fn control(&mut self) -> Result<()> {
        let Some(&next) = self.input.get(self.pos) else {
            return Err(Error::InvalidRtf("dangling backslash".to_string()));
        };

        if !next.is_ascii_alphabetic() {
            self.pos += 1;
            match next {
                b'\\' | b'{' | b'}' => self.text(char::from(next)),
                b'~' => self.text('\u{a0}'),
                b'*' => self.state.dest = Destination::Skip,
                b'\'' => {
                    let hex = self.input.get(self.pos..self.pos + 2);
                    let value = hex
                        .and_then(|h| std::str::from_utf8(h).ok())
                        .and_then(|h| u8::from_str_radix(h, 16).ok())
                        .ok_or_else(|| Error::InvalidRtf("bad \\' escape".to_string()))?;
                    self.pos += 2;
                    self.text(decode_ansi(value, self.codepage));
                }
                b'\r' | b'\n' => self.text('\n'),
                // \- optional hyphen, \_ and others: no text
                _ => {}
            }
            return Ok(());
        }

        let start = self.pos;
        while self.input.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
            self.pos += 1;
        }
        let word = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| Error::InvalidRtf("bad control word".to_string()))?
            .to_string();

        let num_start = self.pos;
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while self.input.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        let param = std::str::from_utf8(&self.input[num_start..self.pos])
            .ok()
            .and_then(|s| s.parse::<i32>().ok());
        if self.input.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        self.apply_word(&word, param);
        Ok(())
    }

    fn apply_word(&mut self, word: &str, param: Option<i32>) {
        let group_start = std::mem::take(&mut self.group_start);
        if self.state.dest == Destination::Skip {
            return;
        }
        if group_start && SKIPPED_DESTINATIONS.contains(&word) {
            self.state.dest = Destination::Skip;
            return;
        }

        let index = param.and_then(|p| usize::try_from(p).ok()).unwrap_or(0);
        match (self.state.dest, word) {
            (_, "ansicpg") => {
                self.codepage = param
                    .and_then(|p| u32::try_from(p).ok())
                    .unwrap_or(DEFAULT_CODEPAGE);
            }
            (_, "fonttbl") => self.state.dest = Destination::FontTable,
            (_, "colortbl") => self.state.dest = Destination::ColorTable,
            (Destination::FontTable, "f") => {
                if !self.font_name.is_empty() {
                    self.push_font();
                }
                self.font_num = index;
            }
            (Destination::ColorTable, "red") => self.color.0 = u8::try_from(index).ok(),
            (Destination::ColorTable, "green") => self.color.1 = u8::try_from(index).ok(),
            (Destination::ColorTable, "blue") => self.color.2 = u8::try_from(index).ok(),
            (Destination::Body, "f") => self.state.font = index,
            (Destination::Body, "fs") => self.state.half_points = u32::try_from(index).unwrap_or(24),
            (Destination::Body, "cf") => self.state.fg = index,
            (Destination::Body, "cb" | "highlight") => self.state.bg = index,
            (Destination::Body, "b") => self.set_flag(TextAttributes::BOLD, param != Some(0)),
            (Destination::Body, "i") => self.set_flag(TextAttributes::ITALIC, param != Some(0)),
            (Destination::Body, "plain") => {
                let defaults = GroupState::default();
                self.state = GroupState {
                    dest: self.state.dest,
                    uc: self.state.uc,
                    ..defaults
                };
            }
            (Destination::Body, "par" | "line") => self.text('\n'),
            (Destination::Body, "tab") => self.text('\t'),
            (Destination::Body, "emdash") => self.text('\u{2014}'),
            (Destination::Body, "endash") => self.text('\u{2013}'),
            (Destination::Body, "lquote") => self.text('\u{2018}'),
            (Destination::Body, "rquote") => self.text('\u{2019}'),
            (Destination::Body, "ldblquote") => self.text('\u{201c}'),
            (Destination::Body, "rdblquote") => self.text('\u{201d}'),
            (Destination::Body, "bullet") => self.text('\u{2022}'),
            (_, "uc") => self.state.uc = index,
            (Destination::Body | Destination::FontTable, "u") => {
                // Negative values encode the upper half of the 16-bit range
                let unit = param.unwrap_or(0).rem_euclid(65_536) as u16;
                if let Some(ch) = self.unicode_unit(unit) {
                    self.route(ch);
                }
                self.skip_fallback = self.state.uc;
            }
            _ => {}
        }
    }

    fn set_flag(&mut self, flag: TextAttributes, on: bool) {
        self.state.attributes.set(flag, on);
    }

    fn unicode_unit(&mut self, unit: u16) -> Option<char> {
        if (0xD800..0xDC00).contains(&unit) {
            self.pending_high = Some(unit);
            return None;
        }
        let decoded = match self.pending_high.take() {
            Some(high) => char::decode_utf16([high, unit]).next(),
            None => char::decode_utf16([unit]).next(),
        };
        Some(decoded.and_then(std::result::Result::ok).unwrap_or('\u{fffd}'))
    }

    fn push_font(&mut self) {
        let name = std::mem::take(&mut self.font_name);
        self.fonts.push((self.font_num, name.trim().to_string()));
    }

    fn text(&mut self, ch: char) {
        if self.skip_fallback > 0 {
            self.skip_fallback -= 1;
            return;
        }
        self.route(ch);
    }

    fn route(&mut self, ch: char) {
        match self.state.dest {
            Destination::Body => self.emit(ch),
            Destination::FontTable => {
                if ch == ';' {
                    self.push_font();
                } else {
                    self.font_name.push(ch);
                }
            }
            Destination::ColorTable => {
                if ch == ';' {
                    let color = match self.color {
                        (None, None, None) => None,
                        (r, g, b) => Some(Rgb::new(
                            r.unwrap_or(0),
                            g.unwrap_or(0),
                            b.unwrap_or(0),
                        )),
                    };
                    self.colors.push(color);
                    self.color = (None, None, None);
                }
            }
            Destination::Skip => {}
        }
    }

    fn emit(&mut self, ch: char) {
        let style = self.current_style();
        match self.chunks.last_mut() {
            Some((text, last)) if *last == style => text.push(ch),
            _ => self.chunks.push((ch.to_string(), style)),
        }
    }

    fn current_style(&self) -> Style {
        let family = self
            .fonts
            .iter()
            .find(|(num, _)| *num == self.state.font)
            .map_or_else(|| self.base.family().to_string(), |(_, name)| name.clone());
        let color = |idx: usize, fallback: Rgb| {
            self.colors
                .get(idx)
                .copied()
                .flatten()
                .unwrap_or(fallback)
        };
        let size = u16::try_from(self.state.half_points / 2).unwrap_or(u16::MAX);
        Style::builder()
            .family(family)
            .size(size)
            .fg(color(self.state.fg, Rgb::BLACK))
            .bg(color(self.state.bg, Rgb::WHITE))
            .build()
            .with_attributes(self.state.attributes)
    }
}
