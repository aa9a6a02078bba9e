// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Algebraic simplification.
//!
//! Bottom-up rewriting into a light canonical form: sums collect like terms
//! by coefficient, products collect like bases by exponent, numeric
//! sub-expressions fold. Factors inside a product are ordered by their
//! rendered text so `x * y` and `y * x` collect together.

use crate::ast::Expr;
use crate::error::ExprError;
use crate::functions::{self, SYMBOLIC_FUNCTIONS};
use crate::value::Value;

const MAX_PASSES: usize = 8;

/// Simplify `expr`. Shapes it cannot improve come back unchanged; the only
/// failure is a tree deeper than [`crate::MAX_DEPTH`].
pub fn simplify(expr: &Expr) -> Result<Expr, ExprError> {
    expr.check_depth()?;
    Ok(simplify_tree(expr))
}

/// [`simplify`] without the depth check, for trees derived from checked ones.
pub(crate) fn simplify_tree(expr: &Expr) -> Expr {
    let mut current = pass(expr);
    for _ in 0..MAX_PASSES {
        let next = pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn pass(expr: &Expr) -> Expr {
    match expr {
        Expr::Num(_) | Expr::Const(_) | Expr::Var(_) | Expr::Str(_) => expr.clone(),
        Expr::Neg(inner) => negate(pass(inner)),
        Expr::Add(terms) => collect_sum(terms.iter().map(pass).collect()),
        Expr::Mul(factors) => collect_product(factors.iter().map(pass).collect()),
        Expr::Div(num, den) => quotient(pass(num), pass(den)),
        Expr::Pow(base, exp) => power(pass(base), pass(exp)),
        Expr::Call(name, args) => call(name, args.iter().map(pass).collect()),
    }
}

pub(crate) fn negate(e: Expr) -> Expr {
    match e {
        Expr::Num(n) => Expr::Num(-n),
        Expr::Neg(inner) => *inner,
        other => collect_product(vec![Expr::Num(-1.0), other]),
    }
}

// ── sums ──────────────────────────────────────────────────────────────

struct LikeTerm {
    key: String,
    coef: f64,
    rest: Expr,
}

pub(crate) fn collect_sum(terms: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(terms.len());
    flatten_sum(terms, &mut flat);

    let mut constant = 0.0;
    let mut like: Vec<LikeTerm> = Vec::new();
    for term in flat {
        if let Expr::Num(n) = term {
            constant += n;
            continue;
        }
        let (coef, rest) = split_coefficient(term);
        let key = rest.to_string();
        if let Some(slot) = like.iter_mut().find(|t| t.key == key) {
            slot.coef += coef;
        } else {
            like.push(LikeTerm { key, coef, rest });
        }
    }
    cancel_pythagorean(&mut like, &mut constant);

    let mut out: Vec<Expr> = like
        .into_iter()
        .filter(|t| t.coef != 0.0)
        .map(|t| scale(t.coef, t.rest))
        .collect();
    if constant != 0.0 || out.is_empty() {
        out.push(Expr::Num(constant));
    }
    if out.len() == 1 {
        out.swap_remove(0)
    } else {
        Expr::Add(out)
    }
}

fn flatten_sum(terms: Vec<Expr>, out: &mut Vec<Expr>) {
    for term in terms {
        match term {
            Expr::Add(inner) => flatten_sum(inner, out),
            other => out.push(other),
        }
    }
}

fn split_coefficient(term: Expr) -> (f64, Expr) {
    match term {
        Expr::Neg(inner) => {
            let (c, rest) = split_coefficient(*inner);
            (-c, rest)
        }
        Expr::Mul(mut factors) if matches!(factors.first(), Some(Expr::Num(_))) => {
            let c = factors.remove(0).as_num().unwrap_or(1.0);
            let rest = if factors.len() == 1 {
                factors.swap_remove(0)
            } else {
                Expr::Mul(factors)
            };
            (c, rest)
        }
        Expr::Div(num, den) => {
            let (c, rest) = split_coefficient(*num);
            (c, Expr::Div(Box::new(rest), den))
        }
        other => (1.0, other),
    }
}

fn scale(coef: f64, rest: Expr) -> Expr {
    if coef == 1.0 {
        rest
    } else {
        collect_product(vec![Expr::Num(coef), rest])
    }
}

/// `c·sin(a)^2 + c·cos(a)^2 → c`.
fn cancel_pythagorean(like: &mut [LikeTerm], constant: &mut f64) {
    for i in 0..like.len() {
        let Some(arg) = squared_call(&like[i].rest, "sin") else {
            continue;
        };
        let partner = (0..like.len()).find(|&j| {
            j != i
                && like[j].coef == like[i].coef
                && like[j].coef != 0.0
                && squared_call(&like[j].rest, "cos") == Some(arg)
        });
        if let Some(j) = partner {
            *constant += like[i].coef;
            like[i].coef = 0.0;
            like[j].coef = 0.0;
        }
    }
}

fn squared_call<'a>(e: &'a Expr, name: &str) -> Option<&'a Expr> {
    match e {
        Expr::Pow(base, exp) if exp.as_num() == Some(2.0) => match base.as_ref() {
            Expr::Call(f, args) if f == name && args.len() == 1 => args.first(),
            _ => None,
        },
        _ => None,
    }
}

// ── products and quotients ────────────────────────────────────────────

struct Product {
    num_coef: f64,
    den_coef: f64,
    factors: Vec<(Expr, Expr)>,
}

impl Product {
    fn new() -> Self {
        Self {
            num_coef: 1.0,
            den_coef: 1.0,
            factors: Vec::new(),
        }
    }

    /// `inverted` accumulates the reciprocal of `e`.
    fn absorb(&mut self, e: Expr, inverted: bool) {
        match e {
            Expr::Num(n) if inverted => self.den_coef *= n,
            Expr::Num(n) => self.num_coef *= n,
            Expr::Neg(inner) => {
                self.num_coef = -self.num_coef;
                self.absorb(*inner, inverted);
            }
            Expr::Mul(factors) => {
                for f in factors {
                    self.absorb(f, inverted);
                }
            }
            Expr::Div(num, den) => {
                self.absorb(*num, inverted);
                self.absorb(*den, !inverted);
            }
            Expr::Pow(base, exp) => {
                let exp = if inverted { negate(*exp) } else { *exp };
                self.push(*base, exp);
            }
            other => {
                let exp = Expr::Num(if inverted { -1.0 } else { 1.0 });
                self.push(other, exp);
            }
        }
    }

    fn push(&mut self, base: Expr, exp: Expr) {
        if let Some(slot) = self.factors.iter_mut().find(|(b, _)| *b == base) {
            let prev = std::mem::replace(&mut slot.1, Expr::Num(0.0));
            slot.1 = collect_sum(vec![prev, exp]);
        } else {
            self.factors.push((base, exp));
        }
    }

    fn rebuild(mut self) -> Expr {
        self.factors.sort_by_cached_key(|(base, _)| base.to_string());
        let mut numer = Vec::new();
        let mut denom = Vec::new();
        for (base, exp) in self.factors {
            match exp.as_num() {
                Some(e) if e == 0.0 => {}
                Some(e) if e < 0.0 => match power(base, Expr::Num(-e)) {
                    Expr::Num(v) => self.den_coef *= v,
                    other => denom.push(other),
                },
                _ => match power(base, exp) {
                    Expr::Num(v) => self.num_coef *= v,
                    other => numer.push(other),
                },
            }
        }

        let (mut n, mut d) = (self.num_coef, self.den_coef);
        if n == 0.0 && d != 0.0 {
            return Expr::Num(0.0);
        }
        if d < 0.0 {
            n = -n;
            d = -d;
        }
        let ratio = n / d;
        if numer.is_empty() && denom.is_empty() {
            return Expr::Num(ratio);
        }
        if ratio.is_finite() && ratio.fract() == 0.0 {
            n = ratio;
            d = 1.0;
        }
        let numerator = scaled_product(n, numer);
        if denom.is_empty() && d == 1.0 {
            return numerator;
        }
        let denominator = scaled_product(d, denom);
        Expr::div(numerator, denominator)
    }
}

fn scaled_product(coef: f64, mut factors: Vec<Expr>) -> Expr {
    if factors.is_empty() {
        return Expr::Num(coef);
    }
    let body = if factors.len() == 1 {
        factors.swap_remove(0)
    } else {
        Expr::Mul(factors)
    };
    if coef == 1.0 {
        body
    } else if coef == -1.0 {
        Expr::neg(body)
    } else {
        let mut all = vec![Expr::Num(coef)];
        match body {
            Expr::Mul(inner) => all.extend(inner),
            other => all.push(other),
        }
        Expr::Mul(all)
    }
}

pub(crate) fn collect_product(factors: Vec<Expr>) -> Expr {
    let mut product = Product::new();
    for f in factors {
        product.absorb(f, false);
    }
    product.rebuild()
}

fn quotient(num: Expr, den: Expr) -> Expr {
    if den.as_num() == Some(0.0) {
        return Expr::div(num, den);
    }
    let mut product = Product::new();
    product.absorb(num, false);
    product.absorb(den, true);
    product.rebuild()
}

// ── powers and calls ──────────────────────────────────────────────────

fn power(base: Expr, exp: Expr) -> Expr {
    match (&base, exp.as_num()) {
        (_, Some(e)) if e == 0.0 => Expr::Num(1.0),
        (_, Some(e)) if e == 1.0 => base,
        (Expr::Num(b), Some(e)) => {
            let v = b.powf(e);
            if v.is_finite() {
                Expr::Num(v)
            } else {
                Expr::pow(base, exp)
            }
        }
        (Expr::Num(b), None) if *b == 1.0 => Expr::Num(1.0),
        (Expr::Pow(inner_base, inner_exp), Some(e)) if e.fract() == 0.0 => {
            match inner_exp.as_num() {
                Some(i) => power(inner_base.as_ref().clone(), Expr::Num(i * e)),
                None => Expr::pow(base, exp),
            }
        }
        _ => Expr::pow(base, exp),
    }
}

fn call(name: &str, args: Vec<Expr>) -> Expr {
    let foldable = functions::is_known_function(name)
        && !SYMBOLIC_FUNCTIONS.contains(&name)
        && args.iter().all(|a| a.as_num().is_some());
    if foldable {
        let values: Vec<Value> = args
            .iter()
            .filter_map(Expr::as_num)
            .map(Value::Number)
            .collect();
        if let Ok(Value::Number(v)) = functions::apply(name, &values) {
            if v.is_finite() {
                return Expr::Num(v);
            }
        }
    }
    Expr::Call(name.to_string(), args)
}
