// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typesetting port consumed by the editor panels.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::equation::render_equation;
use crate::error::TypesetError;
use crate::markdown::render_markdown;
use crate::rendered::Rendered;

/// Kind of source handed to a [`Typesetter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// TeX, optionally wrapped in math delimiters.
    #[default]
    Equation,
    /// Markdown with embedded math.
    Markdown,
}

impl SourceKind {
    /// Lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Equation => "equation",
            SourceKind::Markdown => "markdown",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equation" | "latex" | "tex" => Ok(SourceKind::Equation),
            "markdown" | "md" => Ok(SourceKind::Markdown),
            other => Err(format!("unknown source kind: {other}")),
        }
    }
}

/// Renders math-bearing text to markup.
pub trait Typesetter {
    /// Typeset `source`.
    ///
    /// # Errors
    /// Input that cannot be laid out at all.
    fn typeset(&self, kind: SourceKind, source: &str) -> Result<Rendered, TypesetError>;
}

/// HTML + MathML output, no external engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathMlTypesetter;

impl Typesetter for MathMlTypesetter {
    fn typeset(&self, kind: SourceKind, source: &str) -> Result<Rendered, TypesetError> {
        let rendered = match kind {
            SourceKind::Equation => render_equation(source)?,
            SourceKind::Markdown => render_markdown(source),
        };
        for warning in &rendered.warnings {
            warn!(%kind, %warning, "typeset warning");
        }
        Ok(rendered)
    }
}
