// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Evaluation results and variable scopes.

use std::collections::BTreeMap;
use std::fmt;

use crate::ast::Expr;
use crate::complex::Complex;
use crate::format::format_number;

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Real number, possibly non-finite.
    Number(f64),
    /// Complex number with a non-zero imaginary part.
    Complex(Complex),
    /// Symbolic expression (from `derivative`, `simplify`, `expand`).
    Expr(Expr),
    /// String literal.
    Text(String),
}

impl Value {
    /// Collapse a complex number with zero imaginary part to a real one.
    pub fn from_complex(z: Complex) -> Self {
        if z.im == 0.0 {
            Self::Number(z.re)
        } else {
            Self::Complex(z)
        }
    }

    /// Real value, if this is one.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Real and finite value, if this is one. Plot samples use this.
    pub fn as_finite(&self) -> Option<f64> {
        self.as_real().filter(|n| n.is_finite())
    }

    pub(crate) fn as_complex(&self) -> Option<Complex> {
        match self {
            Self::Number(n) => Some(Complex::real(*n)),
            Self::Complex(z) => Some(*z),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Complex(z) => write!(f, "{z}"),
            Self::Expr(e) => write!(f, "{e}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Variable bindings for point evaluation.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    vars: BTreeMap<String, Value>,
}

impl Scope {
    /// Empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.vars.insert(name.into(), Value::Number(value));
        self
    }

    /// Bind `name` to an arbitrary value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Rebind a real variable without reallocating its key when already present.
    pub fn set_number(&mut self, name: &str, value: f64) {
        if let Some(slot) = self.vars.get_mut(name) {
            *slot = Value::Number(value);
        } else {
            self.vars.insert(name.to_string(), Value::Number(value));
        }
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }
}
