// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typesetting errors.

use thiserror::Error;

/// Input that cannot be typeset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesetError {
    /// A `{` without `}` or the reverse.
    #[error("unbalanced braces at {pos}")]
    UnbalancedBraces {
        /// Byte offset of the offending token (or end of input).
        pos: usize,
    },
    /// A command ran out of arguments.
    #[error("missing argument for \\{command}")]
    MissingArgument {
        /// Command name without the backslash.
        command: String,
    },
    /// `\begin{..}` with a name we do not lay out.
    #[error("unknown environment {0}")]
    UnknownEnvironment(String),
    /// `\end{..}` closing a different environment, or none.
    #[error("\\end{{{found}}} does not close \\begin{{{expected}}}")]
    MismatchedEnvironment {
        /// Environment that is open.
        expected: String,
        /// Environment named by `\end`.
        found: String,
    },
    /// Input ended inside `\begin{..}`.
    #[error("missing \\end{{{0}}}")]
    UnclosedEnvironment(String),
    /// `\left` without `\right` or the reverse.
    #[error("unbalanced \\left / \\right")]
    UnbalancedDelimiters,
    /// A token that only makes sense inside an environment.
    #[error("misplaced {0}")]
    Misplaced(String),
    /// Groups or command arguments nest past [`crate::MAX_NESTING`].
    #[error("formula nested too deeply at {pos} (limit {limit})")]
    TooDeep {
        /// Deepest nesting accepted.
        limit: usize,
        /// Byte offset where the limit was hit.
        pos: usize,
    },
    /// Opening math delimiter without its closer.
    #[error("unterminated math starting with {delimiter} at {pos}")]
    UnterminatedMath {
        /// The opening delimiter.
        delimiter: &'static str,
        /// Byte offset of the delimiter.
        pos: usize,
    },
}
