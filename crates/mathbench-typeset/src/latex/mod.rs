// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! LaTeX math to presentation MathML.
//!
//! Covers the subset the editors use: groups, scripts, fractions, roots,
//! Greek letters, big operators with limits, named functions, relations and
//! arrows, accents, `\left…\right`, text and font switches, and the
//! matrix-like environments (`matrix`, `pmatrix`, `bmatrix`, `vmatrix`,
//! `cases`, `aligned`). Unknown commands become `<merror>` and a warning;
//! structural problems (braces, environments) are errors.

mod lexer;
mod node;
mod parser;
mod symbols;

pub(crate) use node::push_escaped;
pub use parser::MAX_NESTING;

use crate::error::TypesetError;

/// MathML for one formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathMl {
    /// A complete `<math>` element.
    pub markup: String,
    /// Unknown commands encountered, in order.
    pub warnings: Vec<String>,
}

/// Convert one formula body (no delimiters) to a `<math>` element.
///
/// # Errors
/// Unbalanced braces, `\left`/`\right` or environments, unknown environments
/// and commands missing an argument.
pub fn latex_to_mathml(tex: &str, display: bool) -> Result<MathMl, TypesetError> {
    let (tree, warnings) = parser::Parser::new(tex, display).parse()?;
    let mut markup = String::with_capacity(tex.len() * 8);
    markup.push_str("<math xmlns=\"http://www.w3.org/1998/Math/MathML\" display=\"");
    markup.push_str(if display { "block" } else { "inline" });
    markup.push_str("\"><semantics><mrow>");
    if let node::Node::Row(nodes) = &tree {
        for n in nodes {
            n.write(&mut markup);
        }
    }
    markup.push_str("</mrow><annotation encoding=\"application/x-tex\">");
    push_escaped(&mut markup, tex.trim());
    markup.push_str("</annotation></semantics></math>");
    Ok(MathMl { markup, warnings })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn body(tex: &str) -> String {
        let m = latex_to_mathml(tex, true).unwrap();
        let start = m.markup.find("<semantics><mrow>").unwrap() + "<semantics><mrow>".len();
        let end = m.markup.find("</mrow><annotation").unwrap();
        m.markup[start..end].to_string()
    }

    #[test]
    fn mass_energy() {
        assert_eq!(
            body("E = mc^2"),
            "<mi>E</mi><mo>=</mo><mi>m</mi><msup><mi>c</mi><mn>2</mn></msup>"
        );
    }

    #[test]
    fn fraction_and_roots() {
        assert_eq!(body(r"\frac{a}{b}"), "<mfrac><mi>a</mi><mi>b</mi></mfrac>");
        assert_eq!(body(r"\frac12"), "<mfrac><mn>1</mn><mn>2</mn></mfrac>");
        assert_eq!(body(r"\sqrt{x}"), "<msqrt><mi>x</mi></msqrt>");
        assert_eq!(body(r"\sqrt[3]{x}"), "<mroot><mi>x</mi><mn>3</mn></mroot>");
    }

    #[test]
    fn numbers_keep_their_decimals() {
        assert_eq!(body("3.14x"), "<mn>3.14</mn><mi>x</mi>");
    }

    #[test]
    fn sum_takes_limits_only_in_display_style() {
        assert!(body(r"\sum_{i=1}^{n} i^2").starts_with("<munderover><mo movablelimits"));
        let inline = latex_to_mathml(r"\sum_{i=1}^{n} i^2", false).unwrap();
        assert!(inline.markup.contains("<msubsup><mo movablelimits"));
    }

    #[test]
    fn integral_scripts_stay_at_the_corner() {
        let b = body(r"\int_{0}^{\pi} \sin(x) dx = 2");
        assert!(b.starts_with("<msubsup><mo largeop=\"true\">∫</mo><mn>0</mn><mi>π</mi></msubsup>"));
        assert!(b.contains("<mi>sin</mi><mo>(</mo><mi>x</mi><mo>)</mo>"));
    }

    #[test]
    fn pmatrix_is_a_fenced_table() {
        let b = body(r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}");
        assert_eq!(
            b,
            "<mrow><mo fence=\"true\" stretchy=\"true\">(</mo><mtable>\
             <mtr><mtd><mi>a</mi></mtd><mtd><mi>b</mi></mtd></mtr>\
             <mtr><mtd><mi>c</mi></mtd><mtd><mi>d</mi></mtd></mtr>\
             </mtable><mo fence=\"true\" stretchy=\"true\">)</mo></mrow>"
        );
    }

    #[test]
    fn trailing_row_break_adds_no_row() {
        let b = body("\\begin{aligned} a &= b \\\\ c &= d \\\\ \\end{aligned}");
        assert_eq!(b.matches("<mtr>").count(), 2);
        assert!(b.starts_with("<mtable columnalign=\"right left\">"));
    }

    #[test]
    fn left_right_and_accents() {
        let b = body(r"\left( \vec{v} \right.");
        assert_eq!(
            b,
            "<mrow><mo fence=\"true\" stretchy=\"true\">(</mo>\
             <mover accent=\"true\"><mi>v</mi><mo>→</mo></mover></mrow>"
        );
    }

    #[test]
    fn text_and_fonts() {
        assert_eq!(body(r"\text{if } x"), "<mtext>if </mtext><mi>x</mi>");
        assert_eq!(
            body(r"\mathbb{R}"),
            "<mi mathvariant=\"double-struck\">R</mi>"
        );
    }

    #[test]
    fn unknown_command_is_a_warning_not_an_error() {
        let m = latex_to_mathml(r"x + \foo", false).unwrap();
        assert!(m.markup.contains("<merror><mtext>\\foo</mtext></merror>"));
        assert_eq!(m.warnings, vec!["unknown command \\foo".to_string()]);
    }

    #[test]
    fn structural_errors() {
        assert_eq!(
            latex_to_mathml(r"\frac{a}{b", true),
            Err(TypesetError::UnbalancedBraces { pos: 10 })
        );
        assert_eq!(
            latex_to_mathml("a}", true),
            Err(TypesetError::UnbalancedBraces { pos: 1 })
        );
        assert_eq!(
            latex_to_mathml(r"\begin{pmatrix} a \end{bmatrix}", true),
            Err(TypesetError::MismatchedEnvironment {
                expected: "pmatrix".into(),
                found: "bmatrix".into(),
            })
        );
        assert_eq!(
            latex_to_mathml(r"\begin{tabular} a \end{tabular}", true),
            Err(TypesetError::UnknownEnvironment("tabular".into()))
        );
        assert_eq!(
            latex_to_mathml(r"\begin{matrix} a", true),
            Err(TypesetError::UnclosedEnvironment("matrix".into()))
        );
        assert_eq!(
            latex_to_mathml(r"\left( x", true),
            Err(TypesetError::UnbalancedDelimiters)
        );
        assert!(matches!(
            latex_to_mathml(r"\frac{a}", true),
            Err(TypesetError::MissingArgument { .. })
        ));
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let n = 20_000;
        let braces = format!("{}x{}", "{".repeat(n), "}".repeat(n));
        assert!(matches!(
            latex_to_mathml(&braces, true),
            Err(TypesetError::TooDeep { limit: MAX_NESTING, .. })
        ));
        let roots = format!("{}x", r"\sqrt".repeat(n));
        assert!(matches!(
            latex_to_mathml(&roots, true),
            Err(TypesetError::TooDeep { .. })
        ));
        let fences = format!("{}x{}", r"\left(".repeat(n), r"\right)".repeat(n));
        assert!(matches!(
            latex_to_mathml(&fences, true),
            Err(TypesetError::TooDeep { .. })
        ));

        let shallow = format!("{}x{}", "{".repeat(100), "}".repeat(100));
        assert_eq!(body(&shallow), body("x"));
    }

    #[test]
    fn annotation_keeps_the_source() {
        let m = latex_to_mathml("a < b", false).unwrap();
        assert!(m.markup.contains("display=\"inline\""));
        assert!(m
            .markup
            .contains("<annotation encoding=\"application/x-tex\">a &lt; b</annotation>"));
    }
}
