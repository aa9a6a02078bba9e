// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]
//! Calculator modes against the real engine, with call counting.

use std::cell::Cell;
use std::rc::Rc;

use mathbench_expr::{Evaluator, Expr, ExprError, MathEngine, Scope, SymbolicMode, Value};
use mathbench_panels::{
    CalcMode, CalculatorPanel, EvaluationResult, PanelError, FACTOR_UNAVAILABLE, NO_RESULT,
    SOLVE_FORMAT, SOLVE_UNAVAILABLE, SOLVE_UNPARSEABLE,
};

/// Forwards to [`MathEngine`] and counts symbolic runs.
#[derive(Clone, Default)]
struct Counting {
    inner: MathEngine,
    runs: Rc<Cell<usize>>,
}

impl Evaluator for Counting {
    fn compile(&self, source: &str) -> Result<Expr, ExprError> {
        self.inner.compile(source)
    }

    fn evaluate_at(&self, compiled: &Expr, scope: &Scope) -> Result<Value, ExprError> {
        self.inner.evaluate_at(compiled, scope)
    }

    fn run(&self, mode: SymbolicMode, source: &str) -> Result<Value, ExprError> {
        self.runs.set(self.runs.get() + 1);
        self.inner.run(mode, source)
    }
}

fn panel() -> (CalculatorPanel<Counting>, Rc<Cell<usize>>) {
    let engine = Counting::default();
    let runs = Rc::clone(&engine.runs);
    (CalculatorPanel::new(engine), runs)
}

#[test]
fn default_input_differentiates() {
    let (mut calc, runs) = panel();
    assert_eq!(calc.mode(), CalcMode::Evaluate);
    assert_eq!(
        calc.calculate(),
        &EvaluationResult::Ready("2 * x + 2".to_string())
    );
    assert_eq!(runs.get(), 1);
}

#[test]
fn each_mode_maps_to_one_call() {
    let (mut calc, runs) = panel();
    for (mode, input, expected) in [
        (CalcMode::Evaluate, "(2+3i) * (1-i)", "5 + i"),
        (CalcMode::Simplify, "x + x", "2 * x"),
        (CalcMode::Expand, "(x+1)^2", "x ^ 2 + 2 * x + 1"),
    ] {
        calc.set_mode(mode);
        calc.set_text(input);
        calc.calculate();
        assert_eq!(calc.result_text(), expected, "{mode}");
    }
    assert_eq!(runs.get(), 3);
}

#[test]
fn evaluator_errors_become_messages() {
    let (mut calc, _) = panel();
    calc.set_text("x + 1");
    calc.calculate();
    assert_eq!(calc.result_text(), "Error: Undefined symbol x");

    calc.set_text("2 * (x + ");
    calc.calculate();
    assert_eq!(calc.result_text(), "Error: Unexpected end of expression");
}

#[test]
fn success_clears_the_previous_error() {
    let (mut calc, _) = panel();
    calc.set_text("1 +");
    assert!(calc.calculate().error().is_some());
    calc.set_text("1 + 1");
    assert_eq!(calc.calculate(), &EvaluationResult::Ready("2".to_string()));
}

#[test]
fn blank_input_has_no_result() {
    let (mut calc, runs) = panel();
    calc.set_text("   ");
    calc.calculate();
    assert_eq!(calc.result_text(), NO_RESULT);
    assert_eq!(runs.get(), 0);
}

#[test]
fn factor_is_refused_without_calling_the_engine() {
    let (mut calc, runs) = panel();
    calc.set_mode(CalcMode::Factor);
    calc.set_text("x^2 - 1");
    assert_eq!(
        calc.calculate(),
        &EvaluationResult::Failed(PanelError::Unsupported(FACTOR_UNAVAILABLE))
    );
    assert_eq!(runs.get(), 0);
}

#[test]
fn solve_checks_the_equation_shape() {
    let (mut calc, runs) = panel();
    calc.set_mode(CalcMode::Solve);

    calc.set_text("2*x + 3");
    calc.calculate();
    assert_eq!(calc.result_text(), SOLVE_FORMAT);

    assert!(calc.load_example("Linear"));
    assert_eq!(calc.input().text(), "2*x + 3 = 7");
    calc.calculate();
    assert_eq!(calc.result_text(), SOLVE_UNAVAILABLE);

    calc.set_text("2*x + = 7");
    calc.calculate();
    assert_eq!(calc.result_text(), SOLVE_UNPARSEABLE);

    calc.set_text("x = 1 = 2");
    calc.calculate();
    assert_eq!(calc.result_text(), SOLVE_UNPARSEABLE);

    assert_eq!(runs.get(), 0);
}

#[test]
fn every_evaluate_example_produces_a_value() {
    let (mut calc, _) = panel();
    for example in CalcMode::Evaluate.examples() {
        assert!(calc.load_example(example.label));
        assert!(calc.calculate().is_ready(), "{}", example.label);
    }
    assert!(!calc.load_example("Missing"));
}
