// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Free-text input owned by a panel.

/// Text the user is editing, plus the default it resets to.
///
/// The text is never validated here; that is the evaluator's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionInput {
    text: String,
    default: String,
    revision: u64,
}

impl ExpressionInput {
    /// Input holding `default`.
    pub fn new(default: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            text: default.clone(),
            default,
            revision: 0,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bumped on every change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the text. Returns whether it changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.revision += 1;
        true
    }

    /// Append `snippet` after a separating space.
    pub fn append(&mut self, snippet: &str) {
        self.text.push(' ');
        self.text.push_str(snippet);
        self.revision += 1;
    }

    /// Restore the default text.
    pub fn reset(&mut self) -> bool {
        let default = self.default.clone();
        self.set_text(default)
    }

    /// Empty the input.
    pub fn clear(&mut self) -> bool {
        self.set_text(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_bump_the_revision_only_on_change() {
        let mut input = ExpressionInput::new("x^2");
        assert!(!input.set_text("x^2"));
        assert_eq!(input.revision(), 0);
        assert!(input.set_text("x^3"));
        input.append(r"\frac{a}{b}");
        assert_eq!(input.text(), r"x^3 \frac{a}{b}");
        assert_eq!(input.revision(), 2);
    }

    #[test]
    fn reset_and_clear() {
        let mut input = ExpressionInput::new("sin(x)");
        input.clear();
        assert_eq!(input.text(), "");
        assert!(input.reset());
        assert_eq!(input.text(), "sin(x)");
    }
}
