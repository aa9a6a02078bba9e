// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! mathbench-typeset: TeX math to MathML, plus Markdown documents with math.
//!
//! The equation editor feeds TeX (bare or inside `$…$`, `\(…\)`, `$$…$$`,
//! `\[…\]`); the document editor feeds Markdown. Both come out as HTML with
//! presentation MathML, so any browser can display them without a script.

mod delimiters;
mod equation;
mod error;
mod latex;
mod markdown;
mod page;
mod rendered;
pub mod templates;
mod typesetter;

pub use delimiters::{split_math, Segment};
pub use equation::render_equation;
pub use error::TypesetError;
pub use latex::{latex_to_mathml, MathMl, MAX_NESTING};
pub use markdown::{markdown_options, render_markdown};
pub use page::standalone_page;
pub use rendered::Rendered;
pub use typesetter::{MathMlTypesetter, SourceKind, Typesetter};
