// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type shared by the lexer, parser, evaluator and rewriters.

use thiserror::Error;

/// Failure raised while parsing, evaluating or rewriting an expression.
///
/// Character positions are 1-based and count Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The input contains a character no token starts with.
    #[error("Unexpected character \"{found}\" (char {pos})")]
    UnexpectedChar {
        /// Offending character.
        found: char,
        /// Position of the character.
        pos: usize,
    },
    /// Input ended while a token or sub-expression was still expected.
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    /// A token appeared where the grammar does not allow it.
    #[error("Unexpected token \"{found}\" (char {pos})")]
    UnexpectedToken {
        /// Text of the offending token.
        found: String,
        /// Position of the token.
        pos: usize,
    },
    /// An opening parenthesis was never closed.
    #[error("Parenthesis ) expected (char {pos})")]
    ExpectedClose {
        /// Position where the closing parenthesis was expected.
        pos: usize,
    },
    /// A string literal has no closing quote.
    #[error("Unterminated string starting at char {pos}")]
    UnterminatedString {
        /// Position of the opening quote.
        pos: usize,
    },
    /// Parentheses, unary operators or quotients nest past [`crate::MAX_DEPTH`].
    #[error("Expression nested too deeply (limit {limit})")]
    TooDeep {
        /// Deepest nesting accepted.
        limit: usize,
    },
    /// An equation was expected but the input has no `=`, or has more than one.
    #[error("Expected exactly one \"=\" in equation")]
    NotAnEquation,
    /// A variable has no binding in the current scope.
    #[error("Undefined symbol {0}")]
    UndefinedSymbol(String),
    /// A call names a function the evaluator does not provide.
    #[error("Undefined function {0}")]
    UnknownFunction(String),
    /// A function was called with the wrong number of arguments.
    #[error("Wrong number of arguments in function {name} ({got} provided, {expected} expected)")]
    Arity {
        /// Function name.
        name: String,
        /// Human-readable arity, e.g. `"1"` or `"1-2"`.
        expected: &'static str,
        /// Number of arguments supplied.
        got: usize,
    },
    /// An argument had the wrong kind of value.
    #[error("Unexpected type of argument in function {name} (expected: {expected})")]
    ArgumentType {
        /// Function or operator name.
        name: String,
        /// Kind of value that was expected.
        expected: &'static str,
    },
    /// The operation has no implementation.
    #[error("{0}")]
    Unsupported(String),
}
