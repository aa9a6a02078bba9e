// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tokenizer for the expression grammar.

use crate::error::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Ident(String),
    Str(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
    Equals,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Ident(name) => name.clone(),
            Self::Str(s) => format!("\"{s}\""),
            Self::Plus => "+".into(),
            Self::Minus => "-".into(),
            Self::Star => "*".into(),
            Self::Slash => "/".into(),
            Self::Caret => "^".into(),
            Self::LParen => "(".into(),
            Self::RParen => ")".into(),
            Self::Comma => ",".into(),
            Self::Equals => "=".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// 1-based character position of the first character.
    pub pos: usize,
}

pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let pos = i + 1;
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            let (value, next) = lex_number(&chars, i);
            tokens.push(Token {
                kind: TokenKind::Number(value),
                pos,
            });
            i = next;
            continue;
        }
        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Ident(chars[start..i].iter().collect()),
                pos,
            });
            continue;
        }
        if c == '"' || c == '\'' {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && chars[end] != c {
                end += 1;
            }
            if end >= chars.len() {
                return Err(ExprError::UnterminatedString { pos });
            }
            tokens.push(Token {
                kind: TokenKind::Str(chars[start..end].iter().collect()),
                pos,
            });
            i = end + 1;
            continue;
        }
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equals,
            other => return Err(ExprError::UnexpectedChar { found: other, pos }),
        };
        tokens.push(Token { kind, pos });
        i += 1;
    }
    Ok(tokens)
}

/// Lexes `12`, `1.5`, `.5`, `1e-3`. An `e` not followed by an exponent is
/// left for the identifier lexer so `2e` reads as `2 * e`.
fn lex_number(chars: &[char], start: usize) -> (f64, usize) {
    let mut i = start;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    let text: String = chars[start..i].iter().collect();
    // The scanned slice is always a valid float literal.
    (text.parse().unwrap_or(f64::NAN), i)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn numbers_and_exponents() {
        assert_eq!(kinds("1e-3"), vec![TokenKind::Number(0.001)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Ident("e".into())]
        );
    }

    #[test]
    fn implicit_product_tokens() {
        assert_eq!(
            kinds("2x"),
            vec![TokenKind::Number(2.0), TokenKind::Ident("x".into())]
        );
    }

    #[test]
    fn strings_and_positions() {
        let toks = tokenize("derivative(\"x^2\", 'x')").unwrap();
        assert_eq!(toks[2].kind, TokenKind::Str("x^2".into()));
        assert_eq!(toks[2].pos, 12);
        assert_eq!(toks[4].kind, TokenKind::Str("x".into()));
    }

    #[test]
    fn rejects_stray_characters() {
        assert_eq!(
            tokenize("2 # 3"),
            Err(ExprError::UnexpectedChar { found: '#', pos: 3 })
        );
        assert_eq!(
            tokenize("\"abc"),
            Err(ExprError::UnterminatedString { pos: 1 })
        );
    }
}
