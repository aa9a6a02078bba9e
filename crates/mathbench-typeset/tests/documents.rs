// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]
//! End-to-end rendering of the editors' starter content.

use mathbench_typeset::templates::{
    find_template, DEFAULT_DOCUMENT, DEFAULT_EQUATION, DOCUMENT_TEMPLATES, EQUATION_TEMPLATES,
};
use mathbench_typeset::{
    render_equation, render_markdown, MathMlTypesetter, SourceKind, TypesetError, Typesetter,
};

#[test]
fn default_document_renders_every_formula() {
    let r = render_markdown(DEFAULT_DOCUMENT);
    assert!(r.warnings.is_empty(), "warnings: {:?}", r.warnings);
    assert!(!r.html.contains("math-error"));
    // E = mc^2, integral, pmatrix, quadratic formula, Maxwell.
    assert_eq!(r.html.matches("<math ").count(), 5);
    assert_eq!(r.html.matches("display=\"block\"").count(), 3);
    assert!(r.html.contains("<h1>Markdown + LaTeX Document</h1>"));
    assert!(r.html.contains("<code>inline code</code>"));
    assert!(r.html.contains("<mfrac>"));
    assert!(r.html.contains("<mtable columnalign=\"right left\">"));
}

#[test]
fn default_equation_is_clean() {
    let r = render_equation(DEFAULT_EQUATION).unwrap();
    assert!(r.warnings.is_empty());
    assert!(r.html.contains("<mo largeop=\"true\">∫</mo>"));
}

#[test]
fn every_equation_template_renders_without_warnings() {
    for t in EQUATION_TEMPLATES {
        let r = render_equation(t.text).unwrap();
        assert!(r.warnings.is_empty(), "{}: {:?}", t.label, r.warnings);
    }
}

#[test]
fn document_templates_append_cleanly() {
    let mut doc = String::from("Notes");
    for t in DOCUMENT_TEMPLATES {
        doc.push(' ');
        doc.push_str(t.text);
    }
    let r = MathMlTypesetter.typeset(SourceKind::Markdown, &doc).unwrap();
    assert!(r.warnings.is_empty(), "{:?}", r.warnings);
    assert_eq!(r.html.matches("<math ").count(), 3);
}

#[test]
fn templates_are_found_by_label() {
    assert_eq!(
        find_template(&EQUATION_TEMPLATES, "summation").map(|t| t.text),
        Some(r"\sum_{i=1}^{n} i^2")
    );
    assert!(find_template(&DOCUMENT_TEMPLATES, "Integral").is_none());
}

#[test]
fn deeply_nested_formulas_fail_without_taking_the_page_down() {
    let n = 20_000;
    let tex = format!("{}x{}", "{".repeat(n), "}".repeat(n));
    let err = MathMlTypesetter
        .typeset(SourceKind::Equation, &tex)
        .unwrap_err();
    assert!(matches!(err, TypesetError::TooDeep { .. }));

    let roots = format!("{}x", r"\sqrt".repeat(n));
    let doc = MathMlTypesetter
        .typeset(SourceKind::Markdown, &format!("# Title\n\nbefore ${roots}$ after"))
        .unwrap();
    assert!(doc.html.contains("<h1>Title</h1>"));
    assert!(doc.html.contains("class=\"math-error\""));
    assert!(doc.html.contains("after"));
    assert_eq!(doc.warnings.len(), 1);
}
