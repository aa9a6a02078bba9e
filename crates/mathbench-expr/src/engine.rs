// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Evaluator port and the built-in engine.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::ast::Expr;
use crate::error::ExprError;
use crate::value::{Scope, Value};

/// Symbolic operations an [`Evaluator`] performs on a whole input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolicMode {
    /// Numeric evaluation with no free variables.
    Evaluate,
    /// Algebraic simplification.
    Simplify,
    /// Polynomial expansion.
    Expand,
}

impl SymbolicMode {
    /// Lower-case tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Evaluate => "evaluate",
            Self::Simplify => "simplify",
            Self::Expand => "expand",
        }
    }
}

impl fmt::Display for SymbolicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolicMode {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evaluate" => Ok(Self::Evaluate),
            "simplify" => Ok(Self::Simplify),
            "expand" => Ok(Self::Expand),
            other => Err(ExprError::Unsupported(format!("unknown mode {other}"))),
        }
    }
}

/// Numeric/symbolic expression evaluator port.
///
/// Panels talk to this trait only; tests substitute recording fakes.
pub trait Evaluator {
    /// Parse once for repeated point evaluation.
    fn compile(&self, source: &str) -> Result<Expr, ExprError>;

    /// Evaluate a compiled expression with the given bindings.
    fn evaluate_at(&self, compiled: &Expr, scope: &Scope) -> Result<Value, ExprError>;

    /// Run one symbolic operation on `source`.
    fn run(&self, mode: SymbolicMode, source: &str) -> Result<Value, ExprError>;
}

/// The in-crate evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathEngine;

impl MathEngine {
    /// New engine. Stateless.
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for MathEngine {
    fn compile(&self, source: &str) -> Result<Expr, ExprError> {
        crate::parse(source)
    }

    fn evaluate_at(&self, compiled: &Expr, scope: &Scope) -> Result<Value, ExprError> {
        crate::evaluate(compiled, scope)
    }

    fn run(&self, mode: SymbolicMode, source: &str) -> Result<Value, ExprError> {
        let expr = crate::parse(source)?;
        debug!(%mode, input = source, "running symbolic operation");
        match mode {
            SymbolicMode::Evaluate => crate::evaluate(&expr, &Scope::new()),
            SymbolicMode::Simplify => crate::simplify(&expr).map(Value::Expr),
            SymbolicMode::Expand => crate::expand(&expr).map(Value::Expr),
        }
    }
}
