// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Symbolic calculator panel.

use std::fmt;
use std::str::FromStr;

use mathbench_expr::{Evaluator, SymbolicMode};
use tracing::debug;

use crate::error::{
    PanelError, FACTOR_UNAVAILABLE, NO_RESULT, SOLVE_FORMAT, SOLVE_UNAVAILABLE, SOLVE_UNPARSEABLE,
};
use crate::examples::{
    find_example, Example, EVALUATE_EXAMPLES, EXPAND_EXAMPLES, SIMPLIFY_EXAMPLES, SOLVE_EXAMPLES,
};
use crate::input::ExpressionInput;
use crate::result::{EvaluationResult, ResultSlot};

/// Input the calculator opens with.
pub const DEFAULT_CALC_INPUT: &str = r#"derivative("x^2 + 2*x", "x")"#;

/// Calculator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalcMode {
    /// Numeric evaluation.
    #[default]
    Evaluate,
    /// Algebraic simplification.
    Simplify,
    /// Polynomial expansion.
    Expand,
    /// Factoring; always reports that it is unavailable.
    Factor,
    /// Equation solving.
    Solve,
}

impl CalcMode {
    /// Every mode, in tab order.
    pub const ALL: [Self; 5] = [
        Self::Evaluate,
        Self::Simplify,
        Self::Expand,
        Self::Factor,
        Self::Solve,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Evaluate => "evaluate",
            Self::Simplify => "simplify",
            Self::Expand => "expand",
            Self::Factor => "factor",
            Self::Solve => "solve",
        }
    }

    /// Label above the input box.
    pub fn input_label(self) -> &'static str {
        match self {
            Self::Simplify => "Expression to Simplify:",
            Self::Expand => "Expression to Expand:",
            Self::Solve => "Equation to Solve:",
            Self::Evaluate | Self::Factor => "Expression:",
        }
    }

    /// Sample inputs for this mode.
    pub fn examples(self) -> &'static [Example] {
        match self {
            Self::Evaluate => &EVALUATE_EXAMPLES,
            Self::Simplify => &SIMPLIFY_EXAMPLES,
            Self::Expand => &EXPAND_EXAMPLES,
            Self::Solve => &SOLVE_EXAMPLES,
            Self::Factor => &[],
        }
    }

    /// The evaluator operation behind this mode, if it has one.
    fn symbolic(self) -> Option<SymbolicMode> {
        match self {
            Self::Evaluate => Some(SymbolicMode::Evaluate),
            Self::Simplify => Some(SymbolicMode::Simplify),
            Self::Expand => Some(SymbolicMode::Expand),
            Self::Factor | Self::Solve => None,
        }
    }
}

impl fmt::Display for CalcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalcMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown calculator mode: {s}"))
    }
}

/// Calculator state: input, selected mode and the last result.
///
/// Evaluation is cheap and runs on explicit [`calculate`](Self::calculate);
/// nothing is debounced.
#[derive(Debug)]
pub struct CalculatorPanel<E> {
    engine: E,
    input: ExpressionInput,
    mode: CalcMode,
    result: ResultSlot<String>,
}

impl<E: Evaluator> CalculatorPanel<E> {
    /// Panel in evaluate mode with the default input.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            input: ExpressionInput::new(DEFAULT_CALC_INPUT),
            mode: CalcMode::default(),
            result: ResultSlot::new(),
        }
    }

    /// Start in `mode`.
    pub fn with_mode(mut self, mode: CalcMode) -> Self {
        self.mode = mode;
        self
    }

    /// Selected mode.
    pub fn mode(&self) -> CalcMode {
        self.mode
    }

    /// Select a mode. The shown result is kept until the next calculation.
    pub fn set_mode(&mut self, mode: CalcMode) {
        self.mode = mode;
    }

    /// The input being edited.
    pub fn input(&self) -> &ExpressionInput {
        &self.input
    }

    /// Replace the input text.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        self.input.set_text(text)
    }

    /// Load the example labelled `label` for the current mode.
    pub fn load_example(&mut self, label: &str) -> bool {
        match find_example(self.mode.examples(), label) {
            Some(example) => {
                self.input.set_text(example.input);
                true
            }
            None => false,
        }
    }

    /// Last result.
    pub fn result(&self) -> &EvaluationResult<String> {
        self.result.current()
    }

    /// Run the selected mode on the current input.
    pub fn calculate(&mut self) -> &EvaluationResult<String> {
        let outcome = self.compute();
        debug!(mode = %self.mode, ok = outcome.is_ready(), "calculated");
        self.result.install(outcome);
        self.result.current()
    }

    /// Result line as shown: the value, the error message, or nothing.
    pub fn result_text(&self) -> String {
        match self.result.current() {
            EvaluationResult::Ready(text) => text.clone(),
            EvaluationResult::Failed(err) => err.to_string(),
            EvaluationResult::Empty => String::new(),
        }
    }

    fn compute(&self) -> EvaluationResult<String> {
        let source = self.input.text().trim();
        let Some(op) = self.mode.symbolic() else {
            return match self.mode {
                CalcMode::Solve => self.check_equation(source),
                _ => EvaluationResult::Failed(PanelError::Unsupported(FACTOR_UNAVAILABLE)),
            };
        };
        if source.is_empty() {
            return EvaluationResult::Failed(PanelError::Evaluation(NO_RESULT.into()));
        }
        match self.engine.run(op, source) {
            Ok(value) => EvaluationResult::Ready(value.to_string()),
            Err(err) => EvaluationResult::Failed(PanelError::Evaluation(format!("Error: {err}"))),
        }
    }

    /// Solve mode: validate the equation shape, then report that no solver
    /// is wired in.
    fn check_equation(&self, source: &str) -> EvaluationResult<String> {
        let Some((lhs, rhs)) = source.split_once('=') else {
            return EvaluationResult::Failed(PanelError::Unsupported(SOLVE_FORMAT));
        };
        let parses = !rhs.contains('=')
            && self.engine.compile(lhs).is_ok()
            && self.engine.compile(rhs).is_ok();
        if parses {
            EvaluationResult::Failed(PanelError::Unsupported(SOLVE_UNAVAILABLE))
        } else {
            EvaluationResult::Failed(PanelError::Evaluation(SOLVE_UNPARSEABLE.into()))
        }
    }
}
