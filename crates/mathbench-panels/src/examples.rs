// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Example inputs offered by the calculator and the plotter.

/// A labelled sample input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    /// Button label.
    pub label: &'static str,
    /// Text loaded into the input.
    pub input: &'static str,
}

const fn ex(label: &'static str, input: &'static str) -> Example {
    Example { label, input }
}

/// Calculator, evaluate mode.
pub const EVALUATE_EXAMPLES: [Example; 4] = [
    ex("Basic", "2 + 3 * 4"),
    ex("Powers", "2^3 + 4^2"),
    ex("Trig", "sin(pi/4) + cos(pi/3)"),
    ex("Complex", "(2+3i) * (1-i)"),
];

/// Calculator, simplify mode.
pub const SIMPLIFY_EXAMPLES: [Example; 4] = [
    ex("Basic", "x + x"),
    ex("Fraction", "(x^2 - 1)/(x - 1)"),
    ex("Trig", "sin(x)^2 + cos(x)^2"),
    ex("Expression", "2x + 3x - 4 + 2"),
];

/// Calculator, expand mode.
pub const EXPAND_EXAMPLES: [Example; 3] = [
    ex("Basic", "(x+1)^2"),
    ex("Binomial", "(x+2)*(x-3)"),
    ex("Complex", "(x+y)^3"),
];

/// Calculator, solve mode.
pub const SOLVE_EXAMPLES: [Example; 2] = [
    ex("Linear", "2*x + 3 = 7"),
    ex("Quadratic", "x^2 - 5*x + 6 = 0"),
];

/// Plotter functions.
pub const FUNCTION_EXAMPLES: [Example; 6] = [
    ex("Quadratic", "x^2"),
    ex("Cubic", "x^3"),
    ex("Sine", "sin(x)"),
    ex("Exponential", "exp(x)"),
    ex("Logarithm", "log(x)"),
    ex("Complex", "sin(x) * exp(-x/5) * cos(x)"),
];

/// Look an example up by label, ignoring case.
pub fn find_example<'a>(examples: &'a [Example], label: &str) -> Option<&'a Example> {
    examples
        .iter()
        .find(|e| e.label.eq_ignore_ascii_case(label))
}
