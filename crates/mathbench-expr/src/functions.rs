// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in numeric functions.

use std::f64::consts::{LN_10, LN_2, PI};

use crate::complex::Complex;
use crate::error::ExprError;
use crate::value::Value;

/// Functions evaluated on their (symbolic) arguments rather than on values.
pub(crate) const SYMBOLIC_FUNCTIONS: &[&str] = &["derivative", "simplify", "expand"];

const NUMERIC_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "exp", "log", "ln",
    "log10", "log2", "sqrt", "cbrt", "abs", "floor", "ceil", "round", "sign", "min", "max", "pow",
];

/// True when `name(...)` parses as a call rather than an implicit product.
pub fn is_known_function(name: &str) -> bool {
    NUMERIC_FUNCTIONS.contains(&name) || SYMBOLIC_FUNCTIONS.contains(&name)
}

pub(crate) fn apply(name: &str, args: &[Value]) -> Result<Value, ExprError> {
    match name {
        "min" | "max" => extremum(name, args),
        "pow" => {
            let [base, exp] = exactly::<2>(name, args, "2")?;
            crate::eval::power(base, exp)
        }
        "log" if args.len() == 2 => {
            let base = complex_arg(name, &args[1])?;
            let x = complex_arg(name, &args[0])?;
            Ok(Value::from_complex(ln_promoted(x) / ln_promoted(base)))
        }
        _ => {
            let [arg] = exactly::<1>(name, args, if name == "log" { "1-2" } else { "1" })?;
            unary(name, arg)
        }
    }
}

fn unary(name: &str, arg: &Value) -> Result<Value, ExprError> {
    match arg {
        Value::Number(x) => real_unary(name, *x),
        Value::Complex(z) => complex_unary(name, *z),
        _ => Err(ExprError::ArgumentType {
            name: name.to_string(),
            expected: "number",
        }),
    }
}

fn real_unary(name: &str, x: f64) -> Result<Value, ExprError> {
    let y = match name {
        "sqrt" if x < 0.0 => return Ok(Value::Complex(Complex::new(0.0, (-x).sqrt()))),
        "log" | "ln" if x < 0.0 => return Ok(Value::Complex(Complex::new((-x).ln(), PI))),
        "log10" if x < 0.0 => return Ok(Value::Complex(Complex::new((-x).ln(), PI) / Complex::real(LN_10))),
        "log2" if x < 0.0 => return Ok(Value::Complex(Complex::new((-x).ln(), PI) / Complex::real(LN_2))),
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "exp" => x.exp(),
        "log" | "ln" => x.ln(),
        "log10" => x.log10(),
        "log2" => x.log2(),
        "sqrt" => x.sqrt(),
        "cbrt" => x.cbrt(),
        "abs" => x.abs(),
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        "round" => x.round(),
        "sign" if x == 0.0 => 0.0,
        "sign" => x.signum(),
        _ => return Err(ExprError::UnknownFunction(name.to_string())),
    };
    Ok(Value::Number(y))
}

fn complex_unary(name: &str, z: Complex) -> Result<Value, ExprError> {
    let w = match name {
        "sin" => z.sin(),
        "cos" => z.cos(),
        "tan" => z.sin() / z.cos(),
        "exp" => z.exp(),
        "log" | "ln" => z.ln(),
        "log10" => z.ln() / Complex::real(LN_10),
        "log2" => z.ln() / Complex::real(LN_2),
        "sqrt" => z.sqrt(),
        "abs" => return Ok(Value::Number(z.abs())),
        _ if is_known_function(name) => {
            return Err(ExprError::ArgumentType {
                name: name.to_string(),
                expected: "real number",
            })
        }
        _ => return Err(ExprError::UnknownFunction(name.to_string())),
    };
    Ok(Value::from_complex(w))
}

fn ln_promoted(z: Complex) -> Complex {
    if z.im == 0.0 && z.re >= 0.0 {
        Complex::real(z.re.ln())
    } else {
        z.ln()
    }
}

fn complex_arg(name: &str, v: &Value) -> Result<Complex, ExprError> {
    v.as_complex().ok_or_else(|| ExprError::ArgumentType {
        name: name.to_string(),
        expected: "number",
    })
}

fn extremum(name: &str, args: &[Value]) -> Result<Value, ExprError> {
    if args.is_empty() {
        return Err(ExprError::Arity {
            name: name.to_string(),
            expected: "1 or more",
            got: 0,
        });
    }
    let mut best: Option<f64> = None;
    for arg in args {
        let x = arg.as_real().ok_or_else(|| ExprError::ArgumentType {
            name: name.to_string(),
            expected: "real number",
        })?;
        best = Some(match best {
            None => x,
            Some(b) if name == "min" => b.min(x),
            Some(b) => b.max(x),
        });
    }
    Ok(Value::Number(best.unwrap_or(f64::NAN)))
}

fn exactly<'a, const N: usize>(
    name: &str,
    args: &'a [Value],
    expected: &'static str,
) -> Result<&'a [Value; N], ExprError> {
    args.try_into().map_err(|_| ExprError::Arity {
        name: name.to_string(),
        expected,
        got: args.len(),
    })
}
