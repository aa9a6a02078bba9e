// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Equation and document editors: debounced typesetting of free text.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use mathbench_app_core::config_port::ConfigPort;
use mathbench_sched::{Debouncer, DEFAULT_DEBOUNCE};
use mathbench_typeset::templates::{
    find_template, Template, DEFAULT_DOCUMENT, DEFAULT_EQUATION, DOCUMENT_TEMPLATES,
    EQUATION_TEMPLATES,
};
use mathbench_typeset::{Rendered, SourceKind, Typesetter};
use tracing::{debug, warn};

use crate::error::{PanelError, RENDER_FAILED};
use crate::input::ExpressionInput;
use crate::result::{EvaluationResult, ResultSlot};

/// Typesetter plus the debounce and result slot in front of it.
#[derive(Debug)]
struct TypesetView<T> {
    typesetter: T,
    kind: SourceKind,
    debounce: Debouncer<String>,
    result: ResultSlot<Rendered>,
}

impl<T: Typesetter> TypesetView<T> {
    fn new(typesetter: T, kind: SourceKind, delay: Duration) -> Self {
        Self {
            typesetter,
            kind,
            debounce: Debouncer::new(delay),
            result: ResultSlot::new(),
        }
    }

    fn schedule(&mut self, text: &str) {
        let generation = self.debounce.push(text.to_string());
        debug!(kind = %self.kind, generation, "render scheduled");
    }

    async fn settle(&mut self) -> bool {
        match self.debounce.settled().await {
            Some(text) => {
                self.render(&text);
                true
            }
            None => false,
        }
    }

    fn render_now(&mut self, text: &str) {
        self.debounce.cancel();
        self.render(text);
    }

    fn render(&mut self, text: &str) {
        let outcome = match self.typesetter.typeset(self.kind, text) {
            Ok(rendered) => EvaluationResult::Ready(rendered),
            Err(err) => {
                warn!(kind = %self.kind, %err, "typesetting failed");
                EvaluationResult::Failed(PanelError::Evaluation(RENDER_FAILED.into()))
            }
        };
        self.result.install(outcome);
    }
}

/// TeX equation editor with a live preview.
///
/// Edits are typeset after a quiet period ([`DEFAULT_DEBOUNCE`] unless
/// configured); only the latest text is ever rendered. Scheduling needs a
/// tokio runtime.
#[derive(Debug)]
pub struct EquationEditor<T> {
    input: ExpressionInput,
    view: TypesetView<T>,
}

impl<T: Typesetter> EquationEditor<T> {
    /// Editor holding the default equation, already rendered.
    pub fn new(typesetter: T) -> Self {
        Self::with_debounce(typesetter, DEFAULT_DEBOUNCE)
    }

    /// Editor with a custom quiet period.
    pub fn with_debounce(typesetter: T, delay: Duration) -> Self {
        let mut editor = Self {
            input: ExpressionInput::new(DEFAULT_EQUATION),
            view: TypesetView::new(typesetter, SourceKind::Equation, delay),
        };
        editor.view.render_now(editor.input.text());
        editor
    }

    /// Current source.
    pub fn text(&self) -> &str {
        self.input.text()
    }

    /// Snippets offered next to the editor.
    pub fn templates(&self) -> &'static [Template] {
        &EQUATION_TEMPLATES
    }

    /// Replace the source and schedule a render.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.input.set_text(text) {
            self.view.schedule(self.input.text());
        }
    }

    /// Append a snippet and schedule a render.
    pub fn append_template(&mut self, template: &Template) {
        self.input.append(template.text);
        self.view.schedule(self.input.text());
    }

    /// Append the template labelled `label`. Returns false if there is none.
    pub fn insert_template(&mut self, label: &str) -> bool {
        match find_template(&EQUATION_TEMPLATES, label) {
            Some(template) => {
                self.append_template(template);
                true
            }
            None => false,
        }
    }

    /// Whether an edit is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.view.debounce.is_pending()
    }

    /// Wait for the pending edit (if any) and render it.
    pub async fn settle(&mut self) -> bool {
        self.view.settle().await
    }

    /// Skip the quiet period and render the current source.
    pub fn render_now(&mut self) -> &EvaluationResult<Rendered> {
        self.view.render_now(self.input.text());
        self.view.result.current()
    }

    /// Last rendered preview.
    pub fn result(&self) -> &EvaluationResult<Rendered> {
        self.view.result.current()
    }
}

/// Which panes the document editor shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Source only.
    Editor,
    /// Rendered only.
    Preview,
    /// Both side by side.
    #[default]
    Split,
}

impl ViewMode {
    /// All modes.
    pub const ALL: [Self; 3] = [Self::Editor, Self::Preview, Self::Split];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Preview => "preview",
            Self::Split => "split",
        }
    }

    /// Whether the source pane is visible.
    pub fn shows_editor(self) -> bool {
        matches!(self, Self::Editor | Self::Split)
    }

    /// Whether the preview pane is visible.
    pub fn shows_preview(self) -> bool {
        matches!(self, Self::Preview | Self::Split)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown view mode: {s}"))
    }
}

/// Markdown document editor with math.
#[derive(Debug)]
pub struct DocumentEditor<T> {
    input: ExpressionInput,
    view: TypesetView<T>,
    view_mode: ViewMode,
    saved_revision: Option<u64>,
}

impl<T: Typesetter> DocumentEditor<T> {
    /// Editor holding the starter document, already rendered.
    pub fn new(typesetter: T) -> Self {
        Self::with_debounce(typesetter, DEFAULT_DEBOUNCE)
    }

    /// Editor with a custom quiet period.
    pub fn with_debounce(typesetter: T, delay: Duration) -> Self {
        let mut editor = Self {
            input: ExpressionInput::new(DEFAULT_DOCUMENT),
            view: TypesetView::new(typesetter, SourceKind::Markdown, delay),
            view_mode: ViewMode::default(),
            saved_revision: None,
        };
        editor.view.render_now(editor.input.text());
        editor
    }

    /// Current Markdown source.
    pub fn text(&self) -> &str {
        self.input.text()
    }

    /// Snippets offered in the toolbar.
    pub fn templates(&self) -> &'static [Template] {
        &DOCUMENT_TEMPLATES
    }

    /// Visible panes.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch panes.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Replace the source and schedule a render.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.input.set_text(text) {
            self.view.schedule(self.input.text());
        }
    }

    /// Append a snippet and schedule a render.
    pub fn append_template(&mut self, template: &Template) {
        self.input.append(template.text);
        self.view.schedule(self.input.text());
    }

    /// Append the template labelled `label`. Returns false if there is none.
    pub fn insert_template(&mut self, label: &str) -> bool {
        match find_template(&DOCUMENT_TEMPLATES, label) {
            Some(template) => {
                self.append_template(template);
                true
            }
            None => false,
        }
    }

    /// Restore the starter document.
    pub fn reset(&mut self) {
        if self.input.reset() {
            self.view.schedule(self.input.text());
        }
    }

    /// Empty the document.
    pub fn clear(&mut self) {
        if self.input.clear() {
            self.view.schedule(self.input.text());
        }
    }

    /// Persist the source. Returns whether the write succeeded.
    pub fn save<C: ConfigPort + ?Sized>(&mut self, config: &C) -> bool {
        let saved = config.save_document(self.input.text());
        if saved {
            self.saved_revision = Some(self.input.revision());
            debug!(bytes = self.input.text().len(), "document saved");
        }
        saved
    }

    /// Replace the source with the saved document, if there is one, and
    /// render it immediately.
    pub fn load<C: ConfigPort + ?Sized>(&mut self, config: &C) -> bool {
        let Some(text) = config.load_document() else {
            return false;
        };
        self.input.set_text(text);
        self.saved_revision = Some(self.input.revision());
        self.view.render_now(self.input.text());
        true
    }

    /// Edited since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.saved_revision != Some(self.input.revision())
    }

    /// Whether an edit is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.view.debounce.is_pending()
    }

    /// Wait for the pending edit (if any) and render it.
    pub async fn settle(&mut self) -> bool {
        self.view.settle().await
    }

    /// Skip the quiet period and render the current source.
    pub fn render_now(&mut self) -> &EvaluationResult<Rendered> {
        self.view.render_now(self.input.text());
        self.view.result.current()
    }

    /// Last rendered preview.
    pub fn result(&self) -> &EvaluationResult<Rendered> {
        self.view.result.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_modes() {
        assert_eq!(ViewMode::default(), ViewMode::Split);
        assert!(ViewMode::Split.shows_editor() && ViewMode::Split.shows_preview());
        assert!(!ViewMode::Preview.shows_editor());
        assert_eq!("preview".parse::<ViewMode>(), Ok(ViewMode::Preview));
    }
}
