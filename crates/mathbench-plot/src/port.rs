// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plotting capability port.

use crate::error::PlotError;
use crate::layout::{PlotLayout, Trace};

/// A charting backend bound to one plot container.
pub trait PlotPort {
    /// Draw a fresh figure, replacing nothing: callers purge first.
    fn new_plot(&mut self, traces: &[Trace], layout: &PlotLayout) -> Result<(), PlotError>;
    /// Dispose the current figure, if any.
    fn purge(&mut self);
}
