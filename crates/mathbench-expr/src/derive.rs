// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Symbolic differentiation.

use crate::ast::Expr;
use crate::error::ExprError;
use crate::simplify::simplify_tree;

/// d(`expr`)/d(`var`), simplified.
pub fn derivative(expr: &Expr, var: &str) -> Result<Expr, ExprError> {
    expr.check_depth()?;
    Ok(simplify_tree(&diff(expr, var)?))
}

fn diff(e: &Expr, x: &str) -> Result<Expr, ExprError> {
    if !e.depends_on(x) {
        return Ok(Expr::Num(0.0));
    }
    Ok(match e {
        Expr::Var(_) => Expr::Num(1.0),
        Expr::Num(_) | Expr::Const(_) | Expr::Str(_) => Expr::Num(0.0),
        Expr::Neg(u) => Expr::neg(diff(u, x)?),
        Expr::Add(terms) => Expr::Add(
            terms
                .iter()
                .map(|t| diff(t, x))
                .collect::<Result<_, _>>()?,
        ),
        Expr::Mul(factors) => {
            let mut terms = Vec::with_capacity(factors.len());
            for (i, f) in factors.iter().enumerate() {
                if !f.depends_on(x) {
                    continue;
                }
                let mut product = factors.clone();
                product[i] = diff(f, x)?;
                terms.push(Expr::Mul(product));
            }
            Expr::Add(terms)
        }
        Expr::Div(u, v) => {
            let du = diff(u, x)?;
            let dv = diff(v, x)?;
            Expr::div(
                Expr::Add(vec![
                    Expr::Mul(vec![du, v.as_ref().clone()]),
                    Expr::neg(Expr::Mul(vec![u.as_ref().clone(), dv])),
                ]),
                Expr::pow(v.as_ref().clone(), Expr::Num(2.0)),
            )
        }
        Expr::Pow(base, exp) => power_rule(base, exp, x)?,
        Expr::Call(name, args) => chain_rule(name, args, x)?,
    })
}

fn power_rule(base: &Expr, exp: &Expr, x: &str) -> Result<Expr, ExprError> {
    let b = base.clone();
    let n = exp.clone();
    if !exp.depends_on(x) {
        // n · b^(n-1) · b'
        return Ok(Expr::Mul(vec![
            n.clone(),
            Expr::pow(b, Expr::Add(vec![n, Expr::Num(-1.0)])),
            diff(base, x)?,
        ]));
    }
    if !base.depends_on(x) {
        // b^n · ln(b) · n'
        return Ok(Expr::Mul(vec![
            Expr::pow(b.clone(), n),
            Expr::call1("log", b),
            diff(exp, x)?,
        ]));
    }
    // b^n · (n' · ln(b) + n · b' / b)
    Ok(Expr::Mul(vec![
        Expr::pow(b.clone(), n.clone()),
        Expr::Add(vec![
            Expr::Mul(vec![diff(exp, x)?, Expr::call1("log", b.clone())]),
            Expr::div(Expr::Mul(vec![n, diff(base, x)?]), b),
        ]),
    ]))
}

fn chain_rule(name: &str, args: &[Expr], x: &str) -> Result<Expr, ExprError> {
    let [u] = args else {
        return Err(ExprError::Unsupported(format!(
            "derivative of {name} with {} arguments is not supported",
            args.len()
        )));
    };
    let du = diff(u, x)?;
    let u = u.clone();
    let outer = match name {
        "sin" => Expr::call1("cos", u),
        "cos" => Expr::neg(Expr::call1("sin", u)),
        "tan" => Expr::div(
            Expr::Num(1.0),
            Expr::pow(Expr::call1("cos", u), Expr::Num(2.0)),
        ),
        "exp" => Expr::call1("exp", u),
        "log" | "ln" => Expr::div(Expr::Num(1.0), u),
        "log10" => Expr::div(
            Expr::Num(1.0),
            Expr::Mul(vec![u, Expr::call1("log", Expr::Num(10.0))]),
        ),
        "log2" => Expr::div(
            Expr::Num(1.0),
            Expr::Mul(vec![u, Expr::call1("log", Expr::Num(2.0))]),
        ),
        "sqrt" => Expr::div(
            Expr::Num(1.0),
            Expr::Mul(vec![Expr::Num(2.0), Expr::call1("sqrt", u)]),
        ),
        "asin" | "acos" => {
            let root = Expr::call1(
                "sqrt",
                Expr::Add(vec![
                    Expr::Num(1.0),
                    Expr::neg(Expr::pow(u, Expr::Num(2.0))),
                ]),
            );
            let d = Expr::div(Expr::Num(1.0), root);
            if name == "acos" {
                Expr::neg(d)
            } else {
                d
            }
        }
        "atan" => Expr::div(
            Expr::Num(1.0),
            Expr::Add(vec![Expr::Num(1.0), Expr::pow(u, Expr::Num(2.0))]),
        ),
        "sinh" => Expr::call1("cosh", u),
        "cosh" => Expr::call1("sinh", u),
        "tanh" => Expr::div(
            Expr::Num(1.0),
            Expr::pow(Expr::call1("cosh", u), Expr::Num(2.0)),
        ),
        "abs" => Expr::call1("sign", u),
        other => {
            return Err(ExprError::Unsupported(format!(
                "derivative of {other} is not supported"
            )))
        }
    };
    Ok(Expr::Mul(vec![outer, du]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::eval::evaluate;
    use crate::parser::parse;
    use crate::value::Scope;
    use approx::assert_relative_eq;

    fn d(src: &str) -> String {
        derivative(&parse(src).unwrap(), "x").unwrap().to_string()
    }

    #[test]
    fn polynomial() {
        assert_eq!(d("x^2 + 2*x"), "2 * x + 2");
        assert_eq!(d("5"), "0");
        assert_eq!(d("x"), "1");
        assert_eq!(d("x^3"), "3 * x ^ 2");
    }

    #[test]
    fn trig_and_chain() {
        assert_eq!(d("sin(x)"), "cos(x)");
        assert_eq!(d("sin(2x)"), "2 * cos(2 * x)");
    }

    #[test]
    fn other_variables_are_constant() {
        assert_eq!(d("y^2 + x*y"), "y");
    }

    #[test]
    fn quotient_matches_numeric_slope() {
        let f = parse("x / (1 + x^2)").unwrap();
        let df = derivative(&f, "x").unwrap();
        let at = |e: &Expr, x: f64| {
            evaluate(e, &Scope::new().with("x", x))
                .unwrap()
                .as_real()
                .unwrap()
        };
        let h = 1e-6;
        let numeric = (at(&f, 0.7 + h) - at(&f, 0.7 - h)) / (2.0 * h);
        assert_relative_eq!(at(&df, 0.7), numeric, epsilon = 1e-6);
    }

    #[test]
    fn unsupported_functions_report() {
        let err = derivative(&parse("floor(x)").unwrap(), "x").unwrap_err();
        assert!(matches!(err, ExprError::Unsupported(_)));
    }
}
