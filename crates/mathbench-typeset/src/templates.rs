// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Starter content and snippet templates for the two editors.

/// A labelled snippet an editor can append to its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Button label.
    pub label: &'static str,
    /// Text appended (after a separating space).
    pub text: &'static str,
}

/// Equation editor starting formula.
pub const DEFAULT_EQUATION: &str = r"\int_{0}^{\pi} \sin(x) dx = 2";

/// Equation editor snippets.
pub const EQUATION_TEMPLATES: [Template; 5] = [
    Template {
        label: "Integral",
        text: r"\int_{a}^{b} f(x) dx",
    },
    Template {
        label: "Matrix",
        text: r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}",
    },
    Template {
        label: "Fraction",
        text: r"\frac{a}{b}",
    },
    Template {
        label: "Summation",
        text: r"\sum_{i=1}^{n} i^2",
    },
    Template {
        label: "Limit",
        text: r"\lim_{x \to \infty} \frac{1}{x}",
    },
];

/// Document editor snippets.
pub const DOCUMENT_TEMPLATES: [Template; 3] = [
    Template {
        label: "Inline Math",
        text: "$E = mc^2$",
    },
    Template {
        label: "Block Math",
        text: "\n$$\n\\frac{a}{b}\n$$\n",
    },
    Template {
        label: "Matrix",
        text: "\n$$\n\\begin{pmatrix}\na & b \\\\\nc & d\n\\end{pmatrix}\n$$\n",
    },
];

/// Document editor starting text.
pub const DEFAULT_DOCUMENT: &str = r"# Markdown + LaTeX Document

## Basic Markdown

You can use **bold**, *italic*, and `inline code` as usual in Markdown.

- Lists work as expected
- With multiple items
  - And nested items

## LaTeX Math

Inline math expressions like $E = mc^2$ can be embedded within text.

Block math expressions:

$$
\int_{0}^{\pi} \sin(x) dx = 2
$$

$$
\begin{pmatrix}
a & b \\
c & d
\end{pmatrix}
$$

## Examples

The quadratic formula: $x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}$

Maxwell's equations:

$$
\begin{aligned}
\nabla \cdot \vec{E} &= \frac{\rho}{\varepsilon_0} \\
\nabla \cdot \vec{B} &= 0 \\
\nabla \times \vec{E} &= -\frac{\partial \vec{B}}{\partial t} \\
\nabla \times \vec{B} &= \mu_0 \vec{J} + \mu_0 \varepsilon_0 \frac{\partial \vec{E}}{\partial t}
\end{aligned}
$$
";

/// Look a template up by label, ignoring case.
pub fn find_template<'a>(templates: &'a [Template], label: &str) -> Option<&'a Template> {
    templates
        .iter()
        .find(|t| t.label.eq_ignore_ascii_case(label))
}
