// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typesetting output.

/// HTML fragment plus anything worth surfacing to the author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// HTML with MathML in place of every formula.
    pub html: String,
    /// Unknown commands and formulas that failed to convert.
    pub warnings: Vec<String>,
}

impl Rendered {
    /// Nothing was produced.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}
