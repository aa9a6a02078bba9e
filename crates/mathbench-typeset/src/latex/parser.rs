// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recursive-descent TeX parser producing a [`Node`] tree.

use super::lexer::{lex, Lexed, Tok};
use super::node::Node;
use super::symbols;
use crate::error::TypesetError;

/// Deepest nesting of groups, environments and command arguments.
pub const MAX_NESTING: usize = 256;

/// What ends the row being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    End,
    Group,
    Bracket,
    Right,
    Cell,
}

pub(crate) struct Parser {
    toks: Vec<Lexed>,
    pos: usize,
    len: usize,
    display: bool,
    envs: Vec<String>,
    warnings: Vec<String>,
    depth: usize,
}

impl Parser {
    pub(crate) fn new(src: &str, display: bool) -> Self {
        Self {
            toks: lex(src),
            pos: 0,
            len: src.len(),
            display,
            envs: Vec::new(),
            warnings: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the whole input. Returns the tree plus warnings for commands
    /// that were rendered as errors.
    pub(crate) fn parse(mut self) -> Result<(Node, Vec<String>), TypesetError> {
        let nodes = self.row(Stop::End)?;
        Ok((Node::Row(nodes), self.warnings))
    }

    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos).map(|l| &l.tok)
    }

    fn here(&self) -> usize {
        self.toks.get(self.pos).map_or(self.len, |l| l.pos)
    }

    fn skip_space(&mut self) {
        while self.peek() == Some(&Tok::Space) {
            self.pos += 1;
        }
    }

    fn is_cmd(tok: &Tok, name: &str) -> bool {
        matches!(tok, Tok::Cmd(c) if c == name)
    }

    /// Runs `step` one level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(
        &mut self,
        step: impl FnOnce(&mut Self) -> Result<T, TypesetError>,
    ) -> Result<T, TypesetError> {
        if self.depth >= MAX_NESTING {
            return Err(TypesetError::TooDeep {
                limit: MAX_NESTING,
                pos: self.here(),
            });
        }
        self.depth += 1;
        let result = step(self);
        self.depth -= 1;
        result
    }

    fn row(&mut self, stop: Stop) -> Result<Vec<Node>, TypesetError> {
        self.nested(|p| p.row_items(stop))
    }

    fn row_items(&mut self, stop: Stop) -> Result<Vec<Node>, TypesetError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_space();
            let Some(tok) = self.peek().cloned() else {
                return match stop {
                    Stop::End => Ok(nodes),
                    Stop::Group | Stop::Bracket => {
                        Err(TypesetError::UnbalancedBraces { pos: self.len })
                    }
                    Stop::Right => Err(TypesetError::UnbalancedDelimiters),
                    Stop::Cell => Err(TypesetError::UnclosedEnvironment(
                        self.envs.last().cloned().unwrap_or_default(),
                    )),
                };
            };
            match tok {
                Tok::Close if stop == Stop::Group => {
                    self.pos += 1;
                    return Ok(nodes);
                }
                Tok::Close => return Err(TypesetError::UnbalancedBraces { pos: self.here() }),
                Tok::Char(']') if stop == Stop::Bracket => {
                    self.pos += 1;
                    return Ok(nodes);
                }
                ref t if Self::is_cmd(t, "right") => {
                    return if stop == Stop::Right {
                        Ok(nodes)
                    } else {
                        Err(TypesetError::UnbalancedDelimiters)
                    };
                }
                ref t if stop == Stop::Cell
                    && (*t == Tok::Amp || Self::is_cmd(t, "\\") || Self::is_cmd(t, "end")) =>
                {
                    return Ok(nodes);
                }
                Tok::Amp => return Err(TypesetError::Misplaced("&".into())),
                ref t if Self::is_cmd(t, "\\") => {
                    // Line breaks outside an environment have no layout here.
                    self.pos += 1;
                }
                Tok::Sup | Tok::Sub => {
                    let node = self.scripts(Node::empty())?;
                    nodes.push(node);
                }
                _ => {
                    let atom = self.atom()?;
                    let node = self.scripts(atom)?;
                    nodes.push(node);
                }
            }
        }
    }

    /// One atom at the cursor; digits gather into a whole number.
    fn atom(&mut self) -> Result<Node, TypesetError> {
        let Some(lexed) = self.toks.get(self.pos).cloned() else {
            return Ok(Node::empty());
        };
        self.pos += 1;
        match lexed.tok {
            Tok::Open => Ok(Node::Row(self.row(Stop::Group)?)),
            Tok::Char(c) if c.is_ascii_digit() => {
                let mut digits = c.to_string();
                while let Some(Tok::Char(d)) = self.peek() {
                    let d = *d;
                    let next_is_digit = matches!(
                        self.toks.get(self.pos + 1).map(|l| &l.tok),
                        Some(Tok::Char(n)) if n.is_ascii_digit()
                    );
                    if d.is_ascii_digit() || (d == '.' && next_is_digit && !digits.contains('.'))
                    {
                        digits.push(d);
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                Ok(Node::Number(digits))
            }
            Tok::Char(c) => Ok(classify(c)),
            Tok::Cmd(name) => self.command(&name),
            Tok::Close | Tok::Sup | Tok::Sub | Tok::Amp | Tok::Space => Ok(Node::empty()),
        }
    }

    /// A single mandatory argument: a group, one character or one command.
    fn arg(&mut self, command: &str) -> Result<Node, TypesetError> {
        self.skip_space();
        let missing = || TypesetError::MissingArgument {
            command: command.to_string(),
        };
        match self.peek().cloned() {
            None | Some(Tok::Close | Tok::Amp | Tok::Sup | Tok::Sub | Tok::Space) => Err(missing()),
            Some(Tok::Open) => {
                self.pos += 1;
                Ok(Node::Row(self.row(Stop::Group)?))
            }
            Some(Tok::Char(c)) => {
                self.pos += 1;
                Ok(classify(c))
            }
            Some(Tok::Cmd(name)) => {
                self.pos += 1;
                self.command(&name)
            }
        }
    }

    /// Raw text of a braced argument, used by `\text` and friends.
    fn text_arg(&mut self, command: &str) -> Result<String, TypesetError> {
        self.skip_space();
        match self.peek().cloned() {
            Some(Tok::Open) => self.pos += 1,
            Some(Tok::Char(c)) => {
                self.pos += 1;
                return Ok(c.to_string());
            }
            _ => {
                return Err(TypesetError::MissingArgument {
                    command: command.to_string(),
                })
            }
        }
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            let Some(tok) = self.peek().cloned() else {
                return Err(TypesetError::UnbalancedBraces { pos: self.len });
            };
            self.pos += 1;
            match tok {
                Tok::Close if depth == 0 => return Ok(text),
                Tok::Close => {
                    depth -= 1;
                    text.push('}');
                }
                Tok::Open => {
                    depth += 1;
                    text.push('{');
                }
                Tok::Char(c) => text.push(c),
                Tok::Space => text.push(' '),
                Tok::Sup => text.push('^'),
                Tok::Sub => text.push('_'),
                Tok::Amp => text.push('&'),
                Tok::Cmd(name) => match symbols::escaped(&name) {
                    Some(s) => text.push_str(s),
                    None => {
                        text.push('\\');
                        text.push_str(&name);
                    }
                },
            }
        }
    }

    /// Attach any `_` / `^` that follow `base`.
    fn scripts(&mut self, base: Node) -> Result<Node, TypesetError> {
        let limits = self.display && matches!(base, Node::LargeOp { limits: true, .. });
        let mut sub = None;
        let mut sup = None;
        loop {
            let save = self.pos;
            self.skip_space();
            match self.peek() {
                Some(Tok::Sub) if sub.is_none() => {
                    self.pos += 1;
                    sub = Some(Box::new(self.arg("_")?));
                }
                Some(Tok::Sup) if sup.is_none() => {
                    self.pos += 1;
                    sup = Some(Box::new(self.arg("^")?));
                }
                _ => {
                    self.pos = save;
                    break;
                }
            }
        }
        if sub.is_none() && sup.is_none() {
            return Ok(base);
        }
        Ok(Node::Scripts {
            base: Box::new(base),
            sub,
            sup,
            limits,
        })
    }

    fn command(&mut self, name: &str) -> Result<Node, TypesetError> {
        self.nested(|p| p.command_body(name))
    }

    fn command_body(&mut self, name: &str) -> Result<Node, TypesetError> {
        match name {
            "frac" | "dfrac" | "tfrac" | "cfrac" => {
                let num = self.arg(name)?;
                let den = self.arg(name)?;
                Ok(Node::Frac(Box::new(num), Box::new(den)))
            }
            "binom" => {
                let top = self.arg(name)?;
                let bottom = self.arg(name)?;
                Ok(Node::Binom(Box::new(top), Box::new(bottom)))
            }
            "sqrt" => {
                self.skip_space();
                if self.peek() == Some(&Tok::Char('[')) {
                    self.pos += 1;
                    let index = Node::Row(self.row(Stop::Bracket)?);
                    let body = self.arg(name)?;
                    Ok(Node::Root {
                        body: Box::new(body),
                        index: Box::new(index),
                    })
                } else {
                    Ok(Node::Sqrt(Box::new(self.arg(name)?)))
                }
            }
            "left" => {
                let open = self.delimiter(name)?;
                let body = self.row(Stop::Right)?;
                self.pos += 1;
                let close = self.delimiter("right")?;
                Ok(Node::Row(vec![
                    Node::Fence(open),
                    Node::Row(body),
                    Node::Fence(close),
                ]))
            }
            "right" => Err(TypesetError::UnbalancedDelimiters),
            "text" | "textrm" | "textit" | "textbf" | "mbox" => {
                Ok(Node::Text(self.text_arg(name)?))
            }
            "begin" => self.environment(),
            "end" => {
                let env = self.text_arg(name)?;
                Err(TypesetError::Misplaced(format!("\\end{{{env}}}")))
            }
            "\\" | "displaystyle" | "textstyle" | "limits" | "nolimits" | "big" | "Big"
            | "bigg" | "Bigg" | "bigl" | "bigr" | "Bigl" | "Bigr" => Ok(Node::empty()),
            _ => self.symbol(name),
        }
    }

    fn symbol(&mut self, name: &str) -> Result<Node, TypesetError> {
        if let Some(variant) = symbols::font(name) {
            let text = self.text_arg(name)?;
            return Ok(Node::Styled { text, variant });
        }
        if let Some(mark) = symbols::accent(name) {
            let base = self.arg(name)?;
            return Ok(Node::Accent {
                base: Box::new(base),
                mark,
            });
        }
        if let Some((symbol, limits)) = symbols::large_operator(name) {
            return Ok(Node::LargeOp { symbol, limits });
        }
        if let Some(s) = symbols::greek(name).or_else(|| symbols::letterlike(name)) {
            return Ok(Node::Ident(s.to_string()));
        }
        if let Some(f) = symbols::function_name(name) {
            return Ok(Node::Ident(f.to_string()));
        }
        if let Some(op) = symbols::operator(name).or_else(|| symbols::escaped(name)) {
            return Ok(Node::Op(op.to_string()));
        }
        if let Some(width) = symbols::spacing(name) {
            return Ok(Node::Space(width));
        }
        self.warnings.push(format!("unknown command \\{name}"));
        Ok(Node::Error(format!("\\{name}")))
    }

    /// The delimiter after `\left` or `\right`; `.` means none.
    fn delimiter(&mut self, command: &str) -> Result<&'static str, TypesetError> {
        self.skip_space();
        let fence = match self.peek() {
            Some(Tok::Char(c)) => match c {
                '(' => Some("("),
                ')' => Some(")"),
                '[' => Some("["),
                ']' => Some("]"),
                '|' => Some("|"),
                '/' => Some("/"),
                '<' => Some("⟨"),
                '>' => Some("⟩"),
                '.' => Some(""),
                _ => None,
            },
            Some(Tok::Cmd(name)) => symbols::operator(name),
            _ => None,
        };
        match fence {
            Some(f) => {
                self.pos += 1;
                Ok(f)
            }
            None => Err(TypesetError::MissingArgument {
                command: command.to_string(),
            }),
        }
    }

    fn environment(&mut self) -> Result<Node, TypesetError> {
        let name = self.text_arg("begin")?;
        let Some((open, close)) = symbols::environment_fences(&name) else {
            return Err(TypesetError::UnknownEnvironment(name));
        };
        if name == "array" {
            // Column spec; alignment is not honoured.
            self.text_arg("array")?;
        }
        let align = match name.as_str() {
            "cases" => Some("left left"),
            "aligned" | "align" | "align*" => Some("right left"),
            _ => None,
        };

        self.envs.push(name.clone());
        let mut rows = Vec::new();
        let mut row = Vec::new();
        loop {
            let cell = self.row(Stop::Cell)?;
            row.push(Node::Row(cell));
            match self.peek() {
                Some(Tok::Amp) => self.pos += 1,
                Some(t) if Self::is_cmd(t, "\\") => {
                    self.pos += 1;
                    rows.push(std::mem::take(&mut row));
                }
                _ => {
                    self.pos += 1;
                    let found = self.text_arg("end")?;
                    if found != name {
                        return Err(TypesetError::MismatchedEnvironment {
                            expected: name,
                            found,
                        });
                    }
                    break;
                }
            }
        }
        self.envs.pop();

        // A trailing `\\` leaves one empty cell behind.
        let trailing_empty = matches!(row.as_slice(), [only] if only.is_empty());
        if !trailing_empty || rows.is_empty() {
            rows.push(row);
        }
        let table = Node::Table { rows, align };
        if open.is_empty() && close.is_empty() {
            return Ok(table);
        }
        Ok(Node::Row(vec![Node::Fence(open), table, Node::Fence(close)]))
    }
}

fn classify(c: char) -> Node {
    if c.is_ascii_digit() {
        Node::Number(c.to_string())
    } else if c.is_alphabetic() {
        Node::Ident(c.to_string())
    } else if c == '\'' {
        Node::Op("′".into())
    } else {
        Node::Op(c.to_string())
    }
}
