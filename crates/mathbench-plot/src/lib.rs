// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! 2D function plotting for Mathbench.
//!
//! [`sample_expression`] turns `y = f(x)` into a [`Series`] with absent
//! points where `f` has no real, finite value. A [`PlotPort`] draws traces
//! with a [`PlotLayout`]; [`SvgPlotter`] is the shipped backend.

mod error;
mod layout;
mod port;
mod sampler;
mod svg;

pub use error::PlotError;
pub use layout::{Axis, LineStyle, Margin, PlotLayout, PlotWindow, Trace};
pub use port::PlotPort;
pub use sampler::{sample_expression, sample_fn, Series, DEFAULT_SAMPLES};
pub use svg::SvgPlotter;
