//! Numeric token cleanup shared by salary and experience parsing
//!
//! The pass runs in three steps:
//!
//! 1. [`strip_trailing_lone_digit`]: drop a single digit at the very end of the text
//!    when it follows a digit and one space (a thousands-separator rendering artifact).
//! 2. Keep only digits, whitespace and dashes; every other character is removed.
//! 3. Split on dashes, then read numbers inside each piece, joining digit groups that
//!    are separated by exactly one whitespace character and are three digits long
//!    (`50 000`, `50\u{202f}000`).

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

const DASHES: [char; 5] = ['-', '\u{2010}', '\u{2013}', '\u{2014}', '\u{2212}'];

fn trailing_lone_digit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]) [0-9]$").expect("static regex"))
}

fn grouped_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{1,3}(?: [0-9]{3})+|[0-9]+").expect("static regex"))
}

/// Removes a trailing lone digit that follows `<digit><space>` at the end of the text
///
/// Only a literal ASCII space triggers the heuristic. It is applied verbatim and can
/// eat a genuine final digit (`"1 5"` becomes `"1"`).
pub fn strip_trailing_lone_digit(text: &str) -> Cow<'_, str> {
    trailing_lone_digit().replace(text, "${1}")
}

/// Extracts the numeric tokens of a salary or experience string, in order
///
/// Returned tokens contain ASCII digits only.
pub fn numeric_tokens(text: &str) -> Vec<String> {
    let stripped = strip_trailing_lone_digit(text);

    let kept: String = stripped
        .chars()
        .filter_map(|c| {
            if c.is_ascii_digit() {
                Some(c)
            } else if DASHES.contains(&c) {
                Some('-')
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                None
            }
        })
        .collect();

    kept.split('-')
        .flat_map(|piece| {
            grouped_number()
                .find_iter(piece)
                .map(|m| m.as_str().replace(' ', ""))
                .collect::<Vec<_>>()
        })
        .collect()
}
