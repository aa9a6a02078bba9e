// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]
//! Debounced typesetting in the equation and document editors.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use mathbench_app_core::config::{ConfigService, MemoryConfigStore};
use mathbench_panels::{DocumentEditor, EquationEditor, EvaluationResult, ViewMode, RENDER_FAILED};
use mathbench_typeset::templates::{DEFAULT_DOCUMENT, DEFAULT_EQUATION};
use mathbench_typeset::{MathMlTypesetter, Rendered, SourceKind, TypesetError, Typesetter};
use tokio::time::{sleep, Instant};

/// Typesets for real and remembers every source it was handed.
#[derive(Clone, Default)]
struct Recording {
    seen: Rc<RefCell<Vec<String>>>,
}

impl Recording {
    fn renders(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

impl Typesetter for Recording {
    fn typeset(&self, kind: SourceKind, source: &str) -> Result<Rendered, TypesetError> {
        self.seen.borrow_mut().push(source.to_string());
        MathMlTypesetter.typeset(kind, source)
    }
}

const QUIET: Duration = Duration::from_millis(300);

fn html<T>(result: &EvaluationResult<T>) -> &T {
    result.ready().unwrap()
}

#[tokio::test(start_paused = true)]
async fn default_equation_renders_once_on_open() {
    let typesetter = Recording::default();
    let mut editor = EquationEditor::with_debounce(typesetter.clone(), QUIET);
    assert_eq!(typesetter.renders(), vec![DEFAULT_EQUATION.to_string()]);
    assert!(html(editor.result()).html.contains("<math"));
    assert!(!editor.is_pending());
    assert!(!editor.settle().await);
    assert_eq!(typesetter.renders().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_renders_only_the_last() {
    let typesetter = Recording::default();
    let mut editor = EquationEditor::with_debounce(typesetter.clone(), QUIET);

    let start = Instant::now();
    for n in 1..=5 {
        editor.set_text(format!("x^{n}"));
        sleep(Duration::from_millis(100)).await;
    }
    assert!(editor.is_pending());
    assert_eq!(typesetter.renders().len(), 1);

    assert!(editor.settle().await);
    assert!(start.elapsed() >= Duration::from_millis(400) + QUIET);
    assert_eq!(typesetter.renders(), vec![DEFAULT_EQUATION.to_string(), "x^5".into()]);
    assert!(html(editor.result()).html.contains("<mn>5</mn>"));
}

#[tokio::test(start_paused = true)]
async fn unchanged_text_schedules_nothing() {
    let mut editor = EquationEditor::with_debounce(MathMlTypesetter, QUIET);
    editor.set_text(DEFAULT_EQUATION);
    assert!(!editor.is_pending());
}

#[tokio::test(start_paused = true)]
async fn broken_tex_is_reported_then_replaced() {
    let mut editor = EquationEditor::with_debounce(MathMlTypesetter, QUIET);
    editor.set_text("x^{2");
    assert!(editor.settle().await);
    assert_eq!(
        editor.result().error().map(ToString::to_string).as_deref(),
        Some(RENDER_FAILED)
    );

    editor.set_text("x^{2}");
    assert!(editor.settle().await);
    assert!(editor.result().is_ready());
}

#[tokio::test(start_paused = true)]
async fn render_now_supersedes_the_pending_edit() {
    let typesetter = Recording::default();
    let mut editor = EquationEditor::with_debounce(typesetter.clone(), QUIET);
    editor.set_text("a + b");
    assert!(editor.render_now().is_ready());
    assert!(!editor.is_pending());
    assert!(!editor.settle().await);
    assert_eq!(typesetter.renders().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn templates_append_after_a_space() {
    let mut editor = EquationEditor::with_debounce(MathMlTypesetter, QUIET);
    editor.set_text("y =");
    assert!(editor.insert_template("Fraction"));
    assert_eq!(editor.text(), "y = \\frac{a}{b}");
    assert!(!editor.insert_template("Tensor"));
    assert!(editor.settle().await);
    assert!(html(editor.result()).html.contains("<mfrac>"));
}

#[tokio::test(start_paused = true)]
async fn document_reset_and_clear_are_debounced() {
    let typesetter = Recording::default();
    let mut doc = DocumentEditor::with_debounce(typesetter.clone(), QUIET);
    assert_eq!(doc.view_mode(), ViewMode::Split);
    let initial = html(doc.result()).clone();
    assert!(initial.html.contains("<h1>"));

    doc.clear();
    assert!(doc.is_pending());
    assert!(doc.settle().await);
    assert!(html(doc.result()).is_empty());

    doc.reset();
    assert_eq!(doc.text(), DEFAULT_DOCUMENT);
    assert!(doc.settle().await);
    assert_eq!(typesetter.renders().len(), 3);
    assert_eq!(html(doc.result()), &initial);
}

#[tokio::test(start_paused = true)]
async fn equation_renders_identically_after_clearing() {
    let mut editor = EquationEditor::with_debounce(MathMlTypesetter, QUIET);
    let initial = html(editor.result()).clone();
    assert!(initial.html.contains("<math"));

    editor.set_text("");
    assert!(editor.settle().await);
    assert!(html(editor.result()).is_empty());

    editor.set_text(DEFAULT_EQUATION);
    assert!(editor.settle().await);
    assert_eq!(html(editor.result()), &initial);
}

#[tokio::test(start_paused = true)]
async fn document_save_load_tracks_dirtiness() {
    let config = ConfigService::new(MemoryConfigStore::new());
    let mut doc = DocumentEditor::with_debounce(MathMlTypesetter, QUIET);
    assert!(doc.is_dirty());
    assert!(!doc.load(&config));

    doc.set_text("# Notes\n\n$E = mc^2$");
    assert!(doc.save(&config));
    assert!(!doc.is_dirty());

    let mut other = DocumentEditor::with_debounce(MathMlTypesetter, QUIET);
    assert!(other.load(&config));
    assert!(!other.is_dirty());
    assert!(!other.is_pending());
    assert_eq!(other.text(), "# Notes\n\n$E = mc^2$");
    assert!(html(other.result()).html.contains("<h1>Notes</h1>"));

    other.insert_template("Inline Math");
    assert!(other.is_dirty());
}
