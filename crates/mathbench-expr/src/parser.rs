// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recursive-descent parser.
//!
//! Grammar, loosest to tightest:
//!
//! ```text
//! sum      := product (('+' | '-') product)*
//! product  := unary (('*' | '/') unary | <implicit> unary)*
//! unary    := ('-' | '+') unary | power
//! power    := primary ('^' unary)?
//! primary  := number | string | ident | ident '(' args ')' | '(' sum ')'
//! ```
//!
//! Implicit multiplication applies when a product is followed directly by a
//! number, identifier or `(`: `2x`, `2(x + 1)`, `(x + 1)(x - 1)`, `3i`.
//!
//! Nesting is capped at [`MAX_DEPTH`]: deeper input fails with
//! [`ExprError::TooDeep`] instead of exhausting the stack.

use crate::ast::{Constant, Expr, MAX_DEPTH};
use crate::error::ExprError;
use crate::functions::is_known_function;
use crate::lexer::{tokenize, Token, TokenKind};

/// Parse a single expression. `=` is rejected.
pub fn parse(src: &str) -> Result<Expr, ExprError> {
    let mut parser = Parser::new(tokenize(src)?);
    let expr = parser.sum()?;
    parser.finish()?;
    expr.check_depth()?;
    Ok(expr)
}

/// Parse `lhs = rhs`.
pub fn parse_equation(src: &str) -> Result<(Expr, Expr), ExprError> {
    let tokens = tokenize(src)?;
    let eq_count = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Equals)
        .count();
    if eq_count != 1 {
        return Err(ExprError::NotAnEquation);
    }
    let mut parser = Parser::new(tokens);
    let lhs = parser.sum()?;
    parser.expect(&TokenKind::Equals)?;
    let rhs = parser.sum()?;
    parser.finish()?;
    lhs.check_depth()?;
    rhs.check_depth()?;
    Ok((lhs, rhs))
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
        }
    }

    /// Fails once `extra` more levels would pass [`MAX_DEPTH`].
    fn guard(&self, extra: usize) -> Result<(), ExprError> {
        if self.depth + extra > MAX_DEPTH {
            return Err(ExprError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.cursor).map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn end_pos(&self) -> usize {
        self.tokens.last().map_or(1, |t| t.pos + 1)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ExprError> {
        match self.next() {
            Some(tok) if &tok.kind == kind => Ok(()),
            Some(tok) => Err(ExprError::UnexpectedToken {
                found: tok.kind.describe(),
                pos: tok.pos,
            }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn finish(&mut self) -> Result<(), ExprError> {
        match self.next() {
            None => Ok(()),
            Some(tok) => Err(ExprError::UnexpectedToken {
                found: tok.kind.describe(),
                pos: tok.pos,
            }),
        }
    }

    fn sum(&mut self) -> Result<Expr, ExprError> {
        let first = self.product()?;
        let mut terms = vec![first];
        loop {
            if self.eat(&TokenKind::Plus) {
                terms.push(self.product()?);
            } else if self.eat(&TokenKind::Minus) {
                terms.push(Expr::neg(self.product()?));
            } else {
                break;
            }
        }
        Ok(if terms.len() == 1 {
            terms.swap_remove(0)
        } else {
            Expr::Add(terms)
        })
    }

    /// Quotients nest to the left without recursing, so each wrap of the
    /// accumulator counts as one level.
    fn product(&mut self) -> Result<Expr, ExprError> {
        let mut acc = self.unary()?;
        let mut layers = 0;
        loop {
            let rhs = if self.eat(&TokenKind::Star) {
                self.unary()?
            } else if self.eat(&TokenKind::Slash) {
                let rhs = self.unary()?;
                layers += 1;
                self.guard(layers)?;
                acc = Expr::div(acc, rhs);
                continue;
            } else if matches!(
                self.peek(),
                Some(TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen)
            ) {
                self.power()?
            } else {
                break;
            };
            if !matches!(acc, Expr::Mul(_)) {
                layers += 1;
                self.guard(layers)?;
            }
            acc = push_factor(acc, rhs);
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        self.guard(1)?;
        self.depth += 1;
        let result = self.unary_inner();
        self.depth -= 1;
        result
    }

    fn unary_inner(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&TokenKind::Minus) {
            let inner = self.unary()?;
            return Ok(match inner {
                Expr::Num(n) => Expr::Num(-n),
                other => Expr::neg(other),
            });
        }
        if self.eat(&TokenKind::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Caret) {
            let exp = self.unary()?;
            return Ok(Expr::pow(base, exp));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let tok = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Num(n)),
            TokenKind::Str(s) => Ok(Expr::Str(s)),
            TokenKind::Ident(name) => {
                if is_known_function(&name) && self.peek() == Some(&TokenKind::LParen) {
                    self.cursor += 1;
                    let args = self.arguments()?;
                    return Ok(Expr::Call(name, args));
                }
                Ok(Constant::from_ident(&name).map_or(Expr::Var(name), Expr::Const))
            }
            TokenKind::LParen => {
                let inner = self.sum()?;
                if !self.eat(&TokenKind::RParen) {
                    let pos = self
                        .tokens
                        .get(self.cursor)
                        .map_or_else(|| self.end_pos(), |t| t.pos);
                    return Err(ExprError::ExpectedClose { pos });
                }
                Ok(inner)
            }
            other => Err(ExprError::UnexpectedToken {
                found: other.describe(),
                pos: tok.pos,
            }),
        }
    }

    /// Parses `a, b, c)` after the opening parenthesis.
    fn arguments(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.sum()?);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            return match self.tokens.get(self.cursor) {
                Some(tok) => Err(ExprError::ExpectedClose { pos: tok.pos }),
                None => Err(ExprError::ExpectedClose {
                    pos: self.end_pos(),
                }),
            };
        }
    }
}

fn push_factor(acc: Expr, rhs: Expr) -> Expr {
    match acc {
        Expr::Mul(mut factors) => {
            factors.push(rhs);
            Expr::Mul(factors)
        }
        other => Expr::Mul(vec![other, rhs]),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(src: &str) -> String {
        parse(src).unwrap().to_string()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(render("2 + 3 * 4"), "2 + 3 * 4");
        assert_eq!(
            parse("2^3^2").unwrap(),
            Expr::pow(
                Expr::Num(2.0),
                Expr::pow(Expr::Num(3.0), Expr::Num(2.0))
            )
        );
        assert_eq!(
            parse("-x^2").unwrap(),
            Expr::neg(Expr::pow(Expr::var("x"), Expr::Num(2.0)))
        );
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(
            parse("2x").unwrap(),
            Expr::Mul(vec![Expr::Num(2.0), Expr::var("x")])
        );
        assert_eq!(render("(x+1)(x-1)"), "(x + 1) * (x - 1)");
        assert_eq!(
            parse("3i").unwrap(),
            Expr::Mul(vec![Expr::Num(3.0), Expr::Const(Constant::I)])
        );
        assert_eq!(render("x(x+1)"), "x * (x + 1)");
    }

    #[test]
    fn calls_with_string_arguments() {
        let e = parse("derivative(\"x^2 + 2*x\", \"x\")").unwrap();
        assert_eq!(
            e,
            Expr::Call(
                "derivative".into(),
                vec![Expr::Str("x^2 + 2*x".into()), Expr::Str("x".into())]
            )
        );
    }

    #[test]
    fn equations_split_on_equals() {
        let (lhs, rhs) = parse_equation("2*x + 3 = 7").unwrap();
        assert_eq!(lhs.to_string(), "2 * x + 3");
        assert_eq!(rhs, Expr::Num(7.0));
        assert_eq!(parse_equation("2*x"), Err(ExprError::NotAnEquation));
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!(parse("2 +"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(parse("(2 + 3"), Err(ExprError::ExpectedClose { .. })));
        assert!(matches!(
            parse("x = 1"),
            Err(ExprError::UnexpectedToken { .. })
        ));
        assert!(matches!(parse("sin(1 2"), Err(ExprError::ExpectedClose { .. })));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let too_deep = Err(ExprError::TooDeep { limit: MAX_DEPTH });
        let n = 10_000;
        let parens = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(parse(&parens), too_deep);
        assert_eq!(parse(&format!("{}x", "-".repeat(n))), too_deep);
        assert_eq!(parse(&format!("2{}", "^2".repeat(n))), too_deep);
        assert_eq!(parse(&format!("1{}", "/1".repeat(n))), too_deep);
        assert_eq!(parse(&format!("{}1{}", "sin(".repeat(n), ")".repeat(n))), too_deep);
        assert_eq!(
            parse(&format!("{}1{}", "(1 - ".repeat(n), ")".repeat(n))),
            too_deep
        );
        assert!(matches!(
            parse_equation(&format!("x = {parens}")),
            Err(ExprError::TooDeep { .. })
        ));
    }

    #[test]
    fn moderate_nesting_still_parses() {
        let n = 100;
        let parens = format!("{}x{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(parse(&parens).unwrap(), Expr::var("x"));
        assert!(parse(&format!("1{}", "/2".repeat(n))).is_ok());
        assert!(parse(&format!("{}x", "-".repeat(n))).is_ok());
        assert_eq!(parse("2 * 3 * 4 * 5 * 6").unwrap().depth(), 2);
    }
}
