//! Encoding sanity
//!
//! Tags decoded with the wrong codec leave recognizable traces: UTF-8 bytes
//! read as Latin-1/CP1252 ("Ã©" for "é"), replacement characters from lossy
//! decoding, and stray control characters.

/// Mojibake sequences, most specific first
pub const MOJIBAKE: [&str; 10] = ["Ã©", "Ã¨", "Ã¶", "Ã¼", "Ã¤", "â€™", "â€œ", "â€", "Ã", "Â"];

/// Describe the first encoding problem in `s`, if any
pub fn encoding_problem(s: &str) -> Option<String> {
    if s.contains('\u{FFFD}') {
        return Some("contains the replacement character U+FFFD".to_string());
    }
    if s.contains('\0') {
        return Some("contains a NUL character".to_string());
    }
    if let Some(c) = s
        .chars()
        .find(|c| c.is_control() && !matches!(c, '\n' | '\t' | '\r'))
    {
        return Some(format!("contains control character U+{:04X}", c as u32));
    }
    MOJIBAKE
        .iter()
        .find(|seq| s.contains(*seq))
        .map(|seq| format!("contains mojibake sequence '{}'", seq))
}
