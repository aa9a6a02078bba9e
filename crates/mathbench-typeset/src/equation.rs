// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Equation-editor rendering: text with TeX delimiters.

use crate::delimiters::{split_math, Segment};
use crate::error::TypesetError;
use crate::latex::{latex_to_mathml, push_escaped};
use crate::rendered::Rendered;

/// Render equation-editor input.
///
/// Text outside delimiters is escaped and kept; each formula becomes MathML.
/// Input without any delimiter is treated as one display formula.
///
/// # Errors
/// The first formula that cannot be converted, or an unterminated delimiter.
pub fn render_equation(source: &str) -> Result<Rendered, TypesetError> {
    let segments = split_math(source)?;
    let mut out = Rendered::default();
    if !segments.iter().any(Segment::is_math) {
        let tex = source.trim();
        if !tex.is_empty() {
            push_formula(&mut out, tex, true)?;
        }
        return Ok(out);
    }
    for segment in segments {
        match segment {
            Segment::Text(text) => push_escaped(&mut out.html, &text),
            Segment::Math { tex, display } => push_formula(&mut out, &tex, display)?,
        }
    }
    Ok(out)
}

fn push_formula(out: &mut Rendered, tex: &str, display: bool) -> Result<(), TypesetError> {
    let math = latex_to_mathml(tex, display)?;
    out.html.push_str(&math.markup);
    out.warnings.extend(math.warnings);
    Ok(())
}
