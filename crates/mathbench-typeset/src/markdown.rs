// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Markdown with `$…$` / `$$…$$` math, rendered through pulldown-cmark.

use pulldown_cmark::{html, CowStr, Event, Options, Parser};
use tracing::debug;

use crate::latex::{latex_to_mathml, push_escaped};
use crate::rendered::Rendered;

/// Extensions the document editor enables.
pub fn markdown_options() -> Options {
    Options::ENABLE_MATH | Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Render a Markdown document to HTML.
///
/// A formula that fails to convert does not fail the document: its source is
/// shown in a `math-error` span and the failure is listed in
/// [`Rendered::warnings`].
pub fn render_markdown(source: &str) -> Rendered {
    let mut warnings = Vec::new();
    let events = Parser::new_ext(source, markdown_options()).map(|event| match event {
        Event::InlineMath(tex) => Event::InlineHtml(formula(&tex, false, &mut warnings)),
        Event::DisplayMath(tex) => Event::InlineHtml(formula(&tex, true, &mut warnings)),
        other => other,
    });
    let mut out = String::with_capacity(source.len() * 2);
    html::push_html(&mut out, events);
    debug!(bytes = out.len(), warnings = warnings.len(), "rendered markdown");
    Rendered {
        html: out,
        warnings,
    }
}

fn formula(tex: &str, display: bool, warnings: &mut Vec<String>) -> CowStr<'static> {
    match latex_to_mathml(tex, display) {
        Ok(math) => {
            warnings.extend(math.warnings);
            math.markup.into()
        }
        Err(err) => {
            let mut span = String::from("<span class=\"math-error\" title=\"");
            push_escaped(&mut span, &err.to_string());
            span.push_str("\">");
            push_escaped(&mut span, tex);
            span.push_str("</span>");
            warnings.push(err.to_string());
            span.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_math_becomes_mathml() {
        let r = render_markdown("Energy: $E = mc^2$.");
        assert!(r.html.starts_with("<p>Energy: <math"));
        assert!(r.html.contains("<msup><mi>c</mi><mn>2</mn></msup>"));
        assert!(r.html.trim_end().ends_with(".</p>"));
    }

    #[test]
    fn display_math_spanning_lines() {
        let r = render_markdown("$$\n\\frac{a}{b}\n$$\n");
        assert!(r.html.contains("display=\"block\""));
        assert!(r.html.contains("<mfrac><mi>a</mi><mi>b</mi></mfrac>"));
    }

    #[test]
    fn markdown_structure_survives() {
        let r = render_markdown("# Title\n\n- one\n- ~~two~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(r.html.contains("<h1>Title</h1>"));
        assert!(r.html.contains("<del>two</del>"));
        assert!(r.html.contains("<table>"));
    }

    #[test]
    fn bad_formula_is_contained() {
        let r = render_markdown("before $\\frac{a}$ after");
        assert!(r.html.contains("class=\"math-error\""));
        assert!(r.html.contains("after"));
        assert_eq!(r.warnings.len(), 1);
    }
}
