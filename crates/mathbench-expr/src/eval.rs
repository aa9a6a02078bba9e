// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tree-walking evaluator.

use std::f64::consts::{E, PI};

use crate::ast::{Constant, Expr};
use crate::complex::Complex;
use crate::derive::derivative;
use crate::error::ExprError;
use crate::expand::expand;
use crate::functions::{self, SYMBOLIC_FUNCTIONS};
use crate::parser::parse;
use crate::simplify::simplify;
use crate::value::{Scope, Value};

/// Evaluate `expr` with free variables resolved from `scope`.
pub fn evaluate(expr: &Expr, scope: &Scope) -> Result<Value, ExprError> {
    expr.check_depth()?;
    eval_node(expr, scope)
}

fn eval_node(expr: &Expr, scope: &Scope) -> Result<Value, ExprError> {
    match expr {
        Expr::Num(n) => Ok(Value::Number(*n)),
        Expr::Const(c) => Ok(constant(*c)),
        Expr::Var(name) => scope
            .get(name)
            .cloned()
            .ok_or_else(|| ExprError::UndefinedSymbol(name.clone())),
        Expr::Str(s) => Ok(Value::Text(s.clone())),
        Expr::Neg(inner) => negate(&eval_node(inner, scope)?),
        Expr::Add(terms) => {
            let mut acc = Value::Number(0.0);
            for term in terms {
                acc = binary("add", &acc, &eval_node(term, scope)?, |a, b| a + b, |a, b| a + b)?;
            }
            Ok(acc)
        }
        Expr::Mul(factors) => {
            let mut acc = Value::Number(1.0);
            for factor in factors {
                acc = binary("multiply", &acc, &eval_node(factor, scope)?, |a, b| a * b, |a, b| a * b)?;
            }
            Ok(acc)
        }
        Expr::Div(num, den) => binary(
            "divide",
            &eval_node(num, scope)?,
            &eval_node(den, scope)?,
            |a, b| a / b,
            |a, b| a / b,
        ),
        Expr::Pow(base, exp) => power(&eval_node(base, scope)?, &eval_node(exp, scope)?),
        Expr::Call(name, args) if SYMBOLIC_FUNCTIONS.contains(&name.as_str()) => {
            symbolic_call(name, args).map(Value::Expr)
        }
        Expr::Call(name, args) => {
            if !functions::is_known_function(name) {
                return Err(ExprError::UnknownFunction(name.clone()));
            }
            let values = args
                .iter()
                .map(|a| eval_node(a, scope))
                .collect::<Result<Vec<_>, _>>()?;
            functions::apply(name, &values)
        }
    }
}

fn constant(c: Constant) -> Value {
    match c {
        Constant::Pi => Value::Number(PI),
        Constant::E => Value::Number(E),
        Constant::I => Value::Complex(Complex::I),
        Constant::Infinity => Value::Number(f64::INFINITY),
        Constant::NaN => Value::Number(f64::NAN),
    }
}

fn negate(v: &Value) -> Result<Value, ExprError> {
    match v {
        Value::Number(n) => Ok(Value::Number(-n)),
        Value::Complex(z) => Ok(Value::Complex(-*z)),
        _ => Err(ExprError::ArgumentType {
            name: "unaryMinus".into(),
            expected: "number",
        }),
    }
}

fn binary(
    name: &str,
    a: &Value,
    b: &Value,
    real: impl Fn(f64, f64) -> f64,
    complex: impl Fn(Complex, Complex) -> Complex,
) -> Result<Value, ExprError> {
    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        return Ok(Value::Number(real(*x, *y)));
    }
    match (a.as_complex(), b.as_complex()) {
        (Some(x), Some(y)) => Ok(Value::from_complex(complex(x, y))),
        _ => Err(ExprError::ArgumentType {
            name: name.to_string(),
            expected: "number",
        }),
    }
}

/// `base ^ exp`, promoting to complex for negative bases with fractional exponents.
pub(crate) fn power(base: &Value, exp: &Value) -> Result<Value, ExprError> {
    if let (Value::Number(b), Value::Number(e)) = (base, exp) {
        if *b < 0.0 && e.fract() != 0.0 && e.is_finite() {
            return Ok(Value::from_complex(
                Complex::real(*b).powc(Complex::real(*e)),
            ));
        }
        return Ok(Value::Number(b.powf(*e)));
    }
    binary("pow", base, exp, f64::powf, Complex::powc)
}

/// `derivative(f, x)`, `simplify(f)`, `expand(f)`. Arguments may be quoted
/// strings or bare expressions.
fn symbolic_call(name: &str, args: &[Expr]) -> Result<Expr, ExprError> {
    let expected = if name == "derivative" { "2" } else { "1" };
    let want = if name == "derivative" { 2 } else { 1 };
    if args.len() != want {
        return Err(ExprError::Arity {
            name: name.to_string(),
            expected,
            got: args.len(),
        });
    }
    let target = match &args[0] {
        Expr::Str(src) => parse(src)?,
        other => other.clone(),
    };
    match name {
        "derivative" => {
            let var = match &args[1] {
                Expr::Str(s) => s.trim().to_string(),
                Expr::Var(v) => v.clone(),
                _ => {
                    return Err(ExprError::ArgumentType {
                        name: name.to_string(),
                        expected: "variable name",
                    })
                }
            };
            derivative(&target, &var)
        }
        "expand" => expand(&target),
        _ => simplify(&target),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eval_str(src: &str) -> Value {
        evaluate(&parse(src).unwrap(), &Scope::new()).unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval_str("2 + 3 * 4"), Value::Number(14.0));
        assert_eq!(eval_str("2^3 + 4^2"), Value::Number(24.0));
        assert_eq!(eval_str("-2^2"), Value::Number(-4.0));
        assert_eq!(eval_str("1/0"), Value::Number(f64::INFINITY));
    }

    #[test]
    fn trig_example() {
        let v = eval_str("sin(pi/4) + cos(pi/3)").as_real().unwrap();
        assert_relative_eq!(v, 1.207_106_781_186_547_5, epsilon = 1e-12);
    }

    #[test]
    fn complex_example() {
        assert_eq!(eval_str("(2+3i) * (1-i)").to_string(), "5 + i");
        assert_eq!(eval_str("i^2"), Value::Number(-1.0));
    }

    #[test]
    fn fractional_power_of_negative_is_complex() {
        assert!(matches!(eval_str("(-8)^(1/3)"), Value::Complex(_)));
    }

    #[test]
    fn variables_come_from_scope() {
        let expr = parse("x^2 + y").unwrap();
        let scope = Scope::new().with("x", 3.0).with("y", 1.0);
        assert_eq!(evaluate(&expr, &scope).unwrap(), Value::Number(10.0));
        assert_eq!(
            evaluate(&expr, &Scope::new()),
            Err(ExprError::UndefinedSymbol("x".into()))
        );
    }

    #[test]
    fn derivative_call_yields_expression() {
        let v = eval_str("derivative(\"x^2 + 2*x\", \"x\")");
        assert_eq!(v.to_string(), "2 * x + 2");
    }

    #[test]
    fn strings_do_not_add() {
        let err = evaluate(&parse("\"a\" + 1").unwrap(), &Scope::new()).unwrap_err();
        assert!(matches!(err, ExprError::ArgumentType { .. }));
    }
}
