// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Splits free text into prose and math on the usual TeX delimiters.
//!
//! `$…$` and `\(…\)` open inline math, `$$…$$` and `\[…\]` open display math.
//! A `\$` outside math is a literal dollar sign.

use crate::error::TypesetError;

/// One run of the scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text, escapes already resolved.
    Text(String),
    /// A formula body without its delimiters.
    Math {
        /// TeX source.
        tex: String,
        /// `true` for `$$…$$` / `\[…\]`.
        display: bool,
    },
}

impl Segment {
    /// Whether this run is a formula.
    pub fn is_math(&self) -> bool {
        matches!(self, Segment::Math { .. })
    }
}

/// Opening delimiter, its closer and whether it starts display math.
/// Order matters: `$$` must be tried before `$`.
const DELIMITERS: [(&str, &str, bool); 4] = [
    ("$$", "$$", true),
    ("\\[", "\\]", true),
    ("\\(", "\\)", false),
    ("$", "$", false),
];

/// Scan `input` into text and math segments.
///
/// # Errors
/// [`TypesetError::UnterminatedMath`] when an opening delimiter has no closer.
pub fn split_math(input: &str) -> Result<Vec<Segment>, TypesetError> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut i = 0;
    while i < input.len() {
        let rest = &input[i..];
        if rest.starts_with("\\$") {
            text.push('$');
            i += 2;
            continue;
        }
        if let Some(&(open, close, display)) = DELIMITERS
            .iter()
            .find(|(open, _, _)| rest.starts_with(open))
        {
            let body_start = i + open.len();
            let end = find_closing(input, body_start, close).ok_or(
                TypesetError::UnterminatedMath {
                    delimiter: open,
                    pos: i,
                },
            )?;
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Math {
                tex: input[body_start..end].to_string(),
                display,
            });
            i = end + close.len();
            continue;
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        text.push(ch);
        i += ch.len_utf8();
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}

/// Byte offset of the first unescaped `close` at or after `from`.
fn find_closing(input: &str, from: usize, close: &str) -> Option<usize> {
    let mut at = from;
    while let Some(rel) = input[at..].find(close) {
        let pos = at + rel;
        if close == "$" && pos > 0 && input.as_bytes()[pos - 1] == b'\\' {
            at = pos + 1;
            continue;
        }
        return Some(pos);
    }
    None
}
