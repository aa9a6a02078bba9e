// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! TeX tokenizer.

/// Token kinds the parser cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Tok {
    /// `\name` or a backslash followed by one non-letter (`\,`, `\\`, `\{`).
    Cmd(String),
    Char(char),
    Open,
    Close,
    Sup,
    Sub,
    Amp,
    /// A run of whitespace.
    Space,
}

/// Token plus the byte offset it started at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexed {
    pub tok: Tok,
    pub pos: usize,
}

pub(crate) fn lex(src: &str) -> Vec<Lexed> {
    let mut out = Vec::new();
    let mut chars = src.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        let tok = match c {
            '\\' => match chars.peek().copied() {
                Some((_, n)) if n.is_ascii_alphabetic() => {
                    let mut name = String::new();
                    while let Some(&(_, n)) = chars.peek() {
                        if !n.is_ascii_alphabetic() {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    Tok::Cmd(name)
                }
                Some((_, n)) => {
                    chars.next();
                    Tok::Cmd(n.to_string())
                }
                None => Tok::Char('\\'),
            },
            '{' => Tok::Open,
            '}' => Tok::Close,
            '^' => Tok::Sup,
            '_' => Tok::Sub,
            '&' => Tok::Amp,
            '%' => {
                while let Some(&(_, n)) = chars.peek() {
                    if n == '\n' {
                        break;
                    }
                    chars.next();
                }
                continue;
            }
            c if c.is_whitespace() => {
                while chars.peek().is_some_and(|&(_, n)| n.is_whitespace()) {
                    chars.next();
                }
                Tok::Space
            }
            c => Tok::Char(c),
        };
        out.push(Lexed { tok, pos });
    }
    out
}
