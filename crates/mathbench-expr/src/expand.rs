// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Polynomial expansion.

use crate::ast::Expr;
use crate::error::ExprError;
use crate::simplify::{collect_product, collect_sum, simplify_tree};

/// Largest integer power of a sum that gets multiplied out.
pub const MAX_EXPANDED_POWER: u32 = 16;

/// Distribute products over sums and multiply out small integer powers of
/// sums, then simplify.
pub fn expand(expr: &Expr) -> Result<Expr, ExprError> {
    expr.check_depth()?;
    Ok(simplify_tree(&expand_node(expr)))
}

fn expand_node(e: &Expr) -> Expr {
    match e {
        Expr::Add(terms) => collect_sum(terms.iter().map(expand_node).collect()),
        Expr::Neg(inner) => distribute(vec![Expr::Num(-1.0), expand_node(inner)]),
        Expr::Mul(factors) => distribute(factors.iter().map(expand_node).collect()),
        Expr::Pow(base, exp) => {
            let base = expand_node(base);
            let exp = expand_node(exp);
            match (&base, exp.as_num()) {
                (Expr::Add(_), Some(n))
                    if n.fract() == 0.0 && (2.0..=f64::from(MAX_EXPANDED_POWER)).contains(&n) =>
                {
                    distribute(vec![base; n as usize])
                }
                _ => Expr::pow(base, exp),
            }
        }
        Expr::Div(num, den) => {
            let num = expand_node(num);
            let den = expand_node(den);
            match num {
                Expr::Add(terms) => collect_sum(
                    terms
                        .into_iter()
                        .map(|t| Expr::div(t, den.clone()))
                        .collect(),
                ),
                other => Expr::div(other, den),
            }
        }
        Expr::Call(name, args) => Expr::Call(name.clone(), args.iter().map(expand_node).collect()),
        Expr::Num(_) | Expr::Const(_) | Expr::Var(_) | Expr::Str(_) => e.clone(),
    }
}

/// Multiply the factors out term by term, collecting after each step so the
/// intermediate sum stays small.
fn distribute(factors: Vec<Expr>) -> Expr {
    let mut acc = vec![Expr::Num(1.0)];
    for factor in factors {
        let parts = summands(factor);
        let mut products = Vec::with_capacity(acc.len() * parts.len());
        for a in &acc {
            for p in &parts {
                products.push(collect_product(vec![a.clone(), p.clone()]));
            }
        }
        acc = summands(collect_sum(products));
    }
    collect_sum(acc)
}

fn summands(e: Expr) -> Vec<Expr> {
    match e {
        Expr::Add(terms) => terms,
        other => vec![other],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn exp(src: &str) -> String {
        expand(&parse(src).unwrap()).unwrap().to_string()
    }

    #[test]
    fn squares_and_products() {
        assert_eq!(exp("(x+1)^2"), "x ^ 2 + 2 * x + 1");
        assert_eq!(exp("(x+2)*(x-3)"), "x ^ 2 - x - 6");
    }

    #[test]
    fn binomial_cube() {
        assert_eq!(exp("(x+y)^3"), "x ^ 3 + 3 * x ^ 2 * y + 3 * x * y ^ 2 + y ^ 3");
    }

    #[test]
    fn negation_distributes() {
        assert_eq!(exp("-(x - 1)"), "-x + 1");
        assert_eq!(exp("2(a + b)"), "2 * a + 2 * b");
    }

    #[test]
    fn large_powers_stay_folded() {
        assert_eq!(exp("(x+1)^20"), "(x + 1) ^ 20");
    }
}
