//! Plain-text encoding.

/// Decode file text into editor text.
///
/// CRLF line endings become `\n`. Everything else, including a missing or
/// present final newline, is kept as it is, so text the editor wrote reads
/// back unchanged.
#[must_use]
pub fn decode_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in text.split_inclusive('\n') {
        match segment.strip_suffix("\r\n") {
            Some(line) => {
                out.push_str(line);
                out.push('\n');
            }
            None => out.push_str(segment),
        }
    }
    out
}
