// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Expression engine for Mathbench.
//!
//! Parses calculator-style input (`2x + 3`, `sin(pi/4)`, `(2+3i) * (1-i)`),
//! evaluates it over reals with complex promotion, and rewrites it
//! symbolically (simplify, expand, derivative).
//!
//! Panels depend on the [`Evaluator`] port; [`MathEngine`] is the shipped
//! implementation.

mod ast;
mod complex;
mod derive;
mod engine;
mod error;
mod eval;
mod expand;
mod format;
mod functions;
mod lexer;
mod parser;
mod simplify;
mod value;

pub use ast::{Constant, Expr, MAX_DEPTH};
pub use complex::Complex;
pub use derive::derivative;
pub use engine::{Evaluator, MathEngine, SymbolicMode};
pub use error::ExprError;
pub use eval::evaluate;
pub use expand::{expand, MAX_EXPANDED_POWER};
pub use format::{format_number, PRECISION};
pub use functions::is_known_function;
pub use parser::{parse, parse_equation};
pub use simplify::simplify;
pub use value::{Scope, Value};
