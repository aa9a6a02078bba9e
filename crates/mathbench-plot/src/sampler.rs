// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Uniform sampling of `y = f(x)`.

use mathbench_expr::{Evaluator, Scope};
use tracing::debug;

use crate::error::PlotError;

/// Sampling intervals used by the plotter.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Sampled curve. `y[i]` is `None` where the function has no real, finite
/// value at `x[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    /// Abscissae, uniformly spaced and inclusive of both ends.
    pub x: Vec<f64>,
    /// Ordinates.
    pub y: Vec<Option<f64>>,
}

impl Series {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// No points at all.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of absent points.
    pub fn absent(&self) -> usize {
        self.y.iter().filter(|y| y.is_none()).count()
    }

    /// True when there is nothing to draw.
    pub fn is_blank(&self) -> bool {
        self.y.iter().all(Option::is_none)
    }

    /// Maximal runs of consecutive defined points.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut out = Vec::new();
        let mut run = Vec::new();
        for (&x, y) in self.x.iter().zip(&self.y) {
            match y {
                Some(y) => run.push((x, *y)),
                None if !run.is_empty() => out.push(std::mem::take(&mut run)),
                None => {}
            }
        }
        if !run.is_empty() {
            out.push(run);
        }
        out
    }
}

/// Sample `f` at `intervals + 1` points spanning `[lo, hi]`.
pub fn sample_fn(
    mut f: impl FnMut(f64) -> Option<f64>,
    [lo, hi]: [f64; 2],
    intervals: usize,
) -> Result<Series, PlotError> {
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(PlotError::InvalidRange {
            lo: lo.to_string(),
            hi: hi.to_string(),
        });
    }
    let intervals = intervals.max(1);
    let step = (hi - lo) / intervals as f64;
    let x: Vec<f64> = (0..=intervals).map(|i| lo + i as f64 * step).collect();
    let y = x
        .iter()
        .map(|&x| f(x).filter(|y| y.is_finite()))
        .collect();
    Ok(Series { x, y })
}

/// Compile `source` once and sample it over `range`.
///
/// A parse failure is an error; a sample that fails to evaluate, is complex
/// or is not finite becomes an absent point.
pub fn sample_expression<E: Evaluator + ?Sized>(
    engine: &E,
    source: &str,
    range: [f64; 2],
    intervals: usize,
) -> Result<Series, PlotError> {
    let compiled = engine
        .compile(source)
        .map_err(PlotError::InvalidExpression)?;
    let mut scope = Scope::new();
    let series = sample_fn(
        |x| {
            scope.set_number("x", x);
            engine
                .evaluate_at(&compiled, &scope)
                .ok()
                .and_then(|v| v.as_finite())
        },
        range,
        intervals,
    )?;
    debug!(
        source,
        points = series.len(),
        absent = series.absent(),
        "sampled function"
    );
    Ok(series)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mathbench_expr::MathEngine;

    #[test]
    fn default_density_is_a_thousand_intervals() {
        let s = sample_expression(&MathEngine::new(), "x^2", [-10.0, 10.0], DEFAULT_SAMPLES)
            .unwrap();
        assert_eq!(s.len(), 1001);
        assert_eq!(s.x[0], -10.0);
        assert!((s.x[1000] - 10.0).abs() < 1e-9);
        assert_eq!(s.y[500], Some(0.0));
        assert_eq!(s.absent(), 0);
    }

    #[test]
    fn complex_and_infinite_samples_are_absent() {
        let engine = MathEngine::new();
        let s = sample_expression(&engine, "log(x)", [-1.0, 1.0], 4).unwrap();
        assert_eq!(s.y[..3], [None, None, None]);
        assert!(s.y[3].is_some());
        assert_eq!(s.segments().len(), 1);

        let s = sample_expression(&engine, "1/x", [-1.0, 1.0], 2).unwrap();
        assert_eq!(s.y, vec![Some(-1.0), None, Some(1.0)]);
        assert_eq!(s.segments().len(), 2);
    }

    #[test]
    fn evaluation_errors_do_not_abort() {
        let s = sample_expression(&MathEngine::new(), "x + y", [0.0, 1.0], 10).unwrap();
        assert!(s.is_blank());
        assert_eq!(s.len(), 11);
    }

    #[test]
    fn parse_errors_and_bad_ranges_fail() {
        let engine = MathEngine::new();
        assert!(matches!(
            sample_expression(&engine, "x +", [0.0, 1.0], 10),
            Err(PlotError::InvalidExpression(_))
        ));
        assert!(matches!(
            sample_expression(&engine, "x", [1.0, 1.0], 10),
            Err(PlotError::InvalidRange { .. })
        ));
    }
}
