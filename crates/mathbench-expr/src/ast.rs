// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Expression tree and its textual rendering.

use std::fmt;

use crate::error::ExprError;
use crate::format::format_number;

/// Deepest expression tree the parser builds and the rewriters accept.
pub const MAX_DEPTH: usize = 256;

/// Named constants recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    /// Ratio of a circle's circumference to its diameter.
    Pi,
    /// Euler's number.
    E,
    /// Imaginary unit.
    I,
    /// Positive infinity.
    Infinity,
    /// Not-a-number.
    NaN,
}

impl Constant {
    /// Resolve an identifier to a constant, if it names one.
    pub fn from_ident(name: &str) -> Option<Self> {
        match name {
            "pi" | "PI" => Some(Self::Pi),
            "e" | "E" => Some(Self::E),
            "i" => Some(Self::I),
            "Infinity" => Some(Self::Infinity),
            "NaN" => Some(Self::NaN),
            _ => None,
        }
    }

    /// Canonical spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::I => "i",
            Self::Infinity => "Infinity",
            Self::NaN => "NaN",
        }
    }
}

/// Expression tree.
///
/// Sums and products are n-ary; subtraction is a sum with a negated term.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Real literal.
    Num(f64),
    /// Named constant.
    Const(Constant),
    /// Free variable.
    Var(String),
    /// String literal (arguments of `derivative("…", "x")`).
    Str(String),
    /// Unary negation.
    Neg(Box<Expr>),
    /// Sum of two or more terms.
    Add(Vec<Expr>),
    /// Product of two or more factors.
    Mul(Vec<Expr>),
    /// Quotient.
    Div(Box<Expr>, Box<Expr>),
    /// Power; right-associative in the source grammar.
    Pow(Box<Expr>, Box<Expr>),
    /// Function call.
    Call(String, Vec<Expr>),
}

impl Expr {
    /// Variable node.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// `base ^ exp`.
    pub fn pow(base: Self, exp: Self) -> Self {
        Self::Pow(Box::new(base), Box::new(exp))
    }

    /// `num / den`.
    pub fn div(num: Self, den: Self) -> Self {
        Self::Div(Box::new(num), Box::new(den))
    }

    /// `-inner`.
    pub fn neg(inner: Self) -> Self {
        Self::Neg(Box::new(inner))
    }

    /// Single-argument call.
    pub fn call1(name: &str, arg: Self) -> Self {
        Self::Call(name.to_string(), vec![arg])
    }

    /// Numeric literal value, if this is one.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// True when `name` occurs free in the tree.
    pub fn depends_on(&self, name: &str) -> bool {
        match self {
            Self::Var(v) => v == name,
            Self::Num(_) | Self::Const(_) | Self::Str(_) => false,
            Self::Neg(a) => a.depends_on(name),
            Self::Add(items) | Self::Mul(items) | Self::Call(_, items) => {
                items.iter().any(|e| e.depends_on(name))
            }
            Self::Div(a, b) | Self::Pow(a, b) => a.depends_on(name) || b.depends_on(name),
        }
    }

    /// Number of nodes on the longest root-to-leaf path. Walks with an
    /// explicit stack so arbitrarily deep trees can be measured.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            match node {
                Self::Num(_) | Self::Const(_) | Self::Var(_) | Self::Str(_) => {}
                Self::Neg(a) => stack.push((a, level + 1)),
                Self::Add(items) | Self::Mul(items) | Self::Call(_, items) => {
                    stack.extend(items.iter().map(|e| (e, level + 1)));
                }
                Self::Div(a, b) | Self::Pow(a, b) => {
                    stack.push((a, level + 1));
                    stack.push((b, level + 1));
                }
            }
        }
        deepest
    }

    /// Reject trees deeper than [`MAX_DEPTH`].
    pub(crate) fn check_depth(&self) -> Result<(), ExprError> {
        if self.depth() > MAX_DEPTH {
            return Err(ExprError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Add(_) => 1,
            Self::Mul(_) | Self::Div(..) => 2,
            Self::Neg(_) => 3,
            Self::Num(n) if *n < 0.0 => 3,
            Self::Pow(..) => 4,
            _ => 5,
        }
    }

    fn fmt_wrapped(&self, f: &mut fmt::Formatter<'_>, wrap: bool) -> fmt::Result {
        if wrap {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }

    fn fmt_subtrahend(term: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match term {
            Self::Neg(inner) => {
                f.write_str(" - ")?;
                inner.fmt_wrapped(f, inner.precedence() <= 1)
            }
            Self::Num(n) if *n < 0.0 => write!(f, " - {}", format_number(-n)),
            Self::Mul(factors) => match factors.split_first() {
                Some((Self::Num(c), rest)) if *c < 0.0 && !rest.is_empty() => {
                    f.write_str(" - ")?;
                    let magnitude = -c;
                    let mut rest = rest.to_vec();
                    if magnitude != 1.0 {
                        rest.insert(0, Self::Num(magnitude));
                    }
                    if rest.len() == 1 {
                        rest[0].fmt_wrapped(f, rest[0].precedence() < 2)
                    } else {
                        write!(f, "{}", Self::Mul(rest))
                    }
                }
                _ => write!(f, " + {term}"),
            },
            other => {
                f.write_str(" + ")?;
                other.fmt_wrapped(f, other.precedence() < 1)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => f.write_str(&format_number(*n)),
            Self::Const(c) => f.write_str(c.name()),
            Self::Var(v) => f.write_str(v),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Neg(inner) => {
                f.write_str("-")?;
                inner.fmt_wrapped(f, inner.precedence() < 3)
            }
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(first) = iter.next() {
                    write!(f, "{first}")?;
                }
                for term in iter {
                    Self::fmt_subtrahend(term, f)?;
                }
                Ok(())
            }
            Self::Mul(factors) => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" * ")?;
                    }
                    let wrap = factor.precedence() < 2 || (i > 0 && factor.precedence() == 3);
                    factor.fmt_wrapped(f, wrap)?;
                }
                Ok(())
            }
            Self::Div(num, den) => {
                num.fmt_wrapped(f, num.precedence() < 2)?;
                f.write_str(" / ")?;
                den.fmt_wrapped(f, den.precedence() <= 3)
            }
            Self::Pow(base, exp) => {
                base.fmt_wrapped(f, base.precedence() <= 4)?;
                f.write_str(" ^ ")?;
                exp.fmt_wrapped(f, exp.precedence() < 3)
            }
            Self::Call(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn subtraction_renders_with_minus() {
        let e = Expr::Add(vec![
            Expr::pow(x(), Expr::Num(2.0)),
            Expr::neg(x()),
            Expr::Num(-6.0),
        ]);
        assert_eq!(e.to_string(), "x ^ 2 - x - 6");
    }

    #[test]
    fn depth_counts_longest_path() {
        assert_eq!(x().depth(), 1);
        let e = Expr::Add(vec![x(), Expr::div(Expr::neg(x()), Expr::Num(2.0))]);
        assert_eq!(e.depth(), 4);
        assert!(e.check_depth().is_ok());

        let mut deep = x();
        for _ in 0..MAX_DEPTH {
            deep = Expr::neg(deep);
        }
        assert_eq!(deep.depth(), MAX_DEPTH + 1);
        assert_eq!(
            deep.check_depth(),
            Err(ExprError::TooDeep { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn negative_coefficient_term() {
        let e = Expr::Add(vec![x(), Expr::Mul(vec![Expr::Num(-3.0), x()])]);
        assert_eq!(e.to_string(), "x - 3 * x");
    }

    #[test]
    fn quotient_parenthesizes_sums() {
        let num = Expr::Add(vec![Expr::pow(x(), Expr::Num(2.0)), Expr::Num(-1.0)]);
        let den = Expr::Add(vec![x(), Expr::Num(-1.0)]);
        assert_eq!(Expr::div(num, den).to_string(), "(x ^ 2 - 1) / (x - 1)");
    }

    #[test]
    fn powers_wrap_compound_bases() {
        let e = Expr::pow(Expr::call1("sin", x()), Expr::Num(2.0));
        assert_eq!(e.to_string(), "sin(x) ^ 2");
        let e = Expr::pow(Expr::Add(vec![x(), Expr::Num(1.0)]), Expr::Num(2.0));
        assert_eq!(e.to_string(), "(x + 1) ^ 2");
        let e = Expr::pow(Expr::Num(-2.0), Expr::Num(2.0));
        assert_eq!(e.to_string(), "(-2) ^ 2");
    }

    #[test]
    fn dependency_check() {
        let e = Expr::Mul(vec![Expr::Num(2.0), Expr::call1("sin", x())]);
        assert!(e.depends_on("x"));
        assert!(!e.depends_on("y"));
    }
}
