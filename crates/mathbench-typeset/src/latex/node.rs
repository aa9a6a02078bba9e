// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Presentation tree and its MathML serialisation.

/// One presentation-MathML construct.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Ident(String),
    Styled { text: String, variant: &'static str },
    Number(String),
    Op(String),
    /// Stretchy delimiter from `\left`/`\right` or an environment; empty means none.
    Fence(&'static str),
    Text(String),
    Space(&'static str),
    Row(Vec<Node>),
    Frac(Box<Node>, Box<Node>),
    Binom(Box<Node>, Box<Node>),
    Sqrt(Box<Node>),
    Root { body: Box<Node>, index: Box<Node> },
    LargeOp { symbol: &'static str, limits: bool },
    Scripts {
        base: Box<Node>,
        sub: Option<Box<Node>>,
        sup: Option<Box<Node>>,
        /// Place scripts under/over instead of at the corner.
        limits: bool,
    },
    Accent { base: Box<Node>, mark: &'static str },
    Table {
        rows: Vec<Vec<Node>>,
        align: Option<&'static str>,
    },
    Error(String),
}

impl Node {
    pub(crate) fn empty() -> Self {
        Node::Row(Vec::new())
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Node::Row(nodes) if nodes.is_empty())
    }

    pub(crate) fn write(&self, out: &mut String) {
        match self {
            Node::Ident(s) => leaf(out, "mi", s),
            Node::Styled { text, variant } => {
                out.push_str("<mi mathvariant=\"");
                out.push_str(variant);
                out.push_str("\">");
                push_escaped(out, text);
                out.push_str("</mi>");
            }
            Node::Number(s) => leaf(out, "mn", s),
            Node::Op(s) => leaf(out, "mo", s),
            Node::Fence(s) => {
                if !s.is_empty() {
                    out.push_str("<mo fence=\"true\" stretchy=\"true\">");
                    push_escaped(out, s);
                    out.push_str("</mo>");
                }
            }
            Node::Text(s) => leaf(out, "mtext", s),
            Node::Space(width) => {
                out.push_str("<mspace width=\"");
                out.push_str(width);
                out.push_str("\"/>");
            }
            Node::Row(nodes) => {
                if let [only] = nodes.as_slice() {
                    only.write(out);
                } else {
                    out.push_str("<mrow>");
                    for n in nodes {
                        n.write(out);
                    }
                    out.push_str("</mrow>");
                }
            }
            Node::Frac(num, den) => element(out, "mfrac", &[num.as_ref(), den.as_ref()]),
            Node::Binom(top, bottom) => {
                out.push_str("<mrow><mo>(</mo><mfrac linethickness=\"0\">");
                top.write(out);
                bottom.write(out);
                out.push_str("</mfrac><mo>)</mo></mrow>");
            }
            Node::Sqrt(body) => element(out, "msqrt", &[body.as_ref()]),
            Node::Root { body, index } => element(out, "mroot", &[body.as_ref(), index.as_ref()]),
            Node::LargeOp { symbol, limits } => {
                if *limits {
                    out.push_str("<mo movablelimits=\"true\">");
                } else {
                    out.push_str("<mo largeop=\"true\">");
                }
                out.push_str(symbol);
                out.push_str("</mo>");
            }
            Node::Scripts {
                base,
                sub,
                sup,
                limits,
            } => {
                let (under, over, both) = if *limits {
                    ("munder", "mover", "munderover")
                } else {
                    ("msub", "msup", "msubsup")
                };
                match (sub, sup) {
                    (Some(sub), Some(sup)) => element(out, both, &[base.as_ref(), sub.as_ref(), sup.as_ref()]),
                    (Some(sub), None) => element(out, under, &[base.as_ref(), sub.as_ref()]),
                    (None, Some(sup)) => element(out, over, &[base.as_ref(), sup.as_ref()]),
                    (None, None) => base.write(out),
                }
            }
            Node::Accent { base, mark } => {
                out.push_str("<mover accent=\"true\">");
                base.write(out);
                out.push_str("<mo>");
                out.push_str(mark);
                out.push_str("</mo></mover>");
            }
            Node::Table { rows, align } => {
                out.push_str("<mtable");
                if let Some(a) = align {
                    out.push_str(" columnalign=\"");
                    out.push_str(a);
                    out.push('"');
                }
                out.push('>');
                for row in rows {
                    out.push_str("<mtr>");
                    for cell in row {
                        out.push_str("<mtd>");
                        cell.write(out);
                        out.push_str("</mtd>");
                    }
                    out.push_str("</mtr>");
                }
                out.push_str("</mtable>");
            }
            Node::Error(s) => {
                out.push_str("<merror><mtext>");
                push_escaped(out, s);
                out.push_str("</mtext></merror>");
            }
        }
    }
}

fn leaf(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    push_escaped(out, text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn element(out: &mut String, tag: &str, children: &[&Node]) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for child in children {
        child.write(out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Append `text` with the XML special characters escaped.
pub(crate) fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
