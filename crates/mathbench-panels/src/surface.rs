// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parametric surface panel: user choices feeding the viewport controller.

use std::ops::RangeInclusive;
use std::time::Duration;

use mathbench_app_core::prefs::ViewportPrefs;
use mathbench_surface::{ExprSurface, SurfacePreset, SurfaceSource};
use mathbench_viewport::{
    ContainerId, RenderBackend, SvgBackend, SyncOutcome, ViewportController, ViewportParams,
};
use tracing::warn;

use crate::error::PanelError;
use crate::result::EvaluationResult;

/// Surface viewer state.
///
/// Every change of source, resolution or size is forwarded to the
/// [`ViewportController`], which rebuilds its session only when something it
/// tracks actually changed. A rejected change leaves the previous surface on
/// screen and shows the error.
#[derive(Debug)]
pub struct SurfacePanel<B: RenderBackend> {
    viewport: ViewportController<B>,
    status: EvaluationResult<SyncOutcome>,
}

impl<B: RenderBackend + Send + 'static> SurfacePanel<B> {
    /// Panel showing the default sphere, no container.
    pub fn new(backend: B) -> Self {
        Self {
            viewport: ViewportController::new(backend),
            status: EvaluationResult::Empty,
        }
    }

    /// Panel configured from saved viewport preferences.
    pub fn from_prefs(backend: B, prefs: &ViewportPrefs) -> Self {
        let interval = Duration::from_secs(1) / prefs.fps.max(1);
        let mut viewport = ViewportController::new(backend)
            .with_damping(prefs.damping)
            .with_frame_interval(interval);
        let params = ViewportParams::default()
            .with_size(prefs.width, prefs.height)
            .with_resolution(prefs.slices, prefs.stacks);
        // No container yet, so this only records the params.
        let status = match viewport.set_params(params) {
            Ok(outcome) => EvaluationResult::Ready(outcome),
            Err(err) => EvaluationResult::Failed(PanelError::Evaluation(err.to_string())),
        };
        Self { viewport, status }
    }

    /// The controller behind the panel.
    pub fn viewport(&self) -> &ViewportController<B> {
        &self.viewport
    }

    /// Outcome of the last change.
    pub fn status(&self) -> &EvaluationResult<SyncOutcome> {
        &self.status
    }

    /// Bind the render container. Needs a tokio runtime.
    pub fn mount(&mut self, container: ContainerId) -> &EvaluationResult<SyncOutcome> {
        let result = self.viewport.attach_container(Some(container));
        self.record(result)
    }

    /// Release everything and forget the container.
    pub fn unmount(&mut self) {
        self.viewport.unmount();
        self.status = EvaluationResult::Empty;
    }

    /// Show a built-in surface.
    pub fn select_preset(&mut self, preset: SurfacePreset) -> &EvaluationResult<SyncOutcome> {
        self.set_source(preset.into())
    }

    /// Show `x(u,v)`, `y(u,v)`, `z(u,v)` over the given domains.
    pub fn set_expressions(
        &mut self,
        [x, y, z]: [&str; 3],
        u: RangeInclusive<f64>,
        v: RangeInclusive<f64>,
    ) -> &EvaluationResult<SyncOutcome> {
        let surface = ExprSurface::new(x, y, z)
            .and_then(|s| s.with_u_range(u))
            .and_then(|s| s.with_v_range(v));
        match surface {
            Ok(surface) => self.set_source(surface.into()),
            Err(err) => {
                warn!(%err, "surface expressions rejected");
                self.status = EvaluationResult::Failed(PanelError::Evaluation(err.to_string()));
                &self.status
            }
        }
    }

    /// Any generating function.
    pub fn set_source(&mut self, source: SurfaceSource) -> &EvaluationResult<SyncOutcome> {
        let params = ViewportParams {
            source,
            ..self.viewport.params().clone()
        };
        let result = self.viewport.set_params(params);
        self.record(result)
    }

    /// Tessellation grid.
    pub fn set_resolution(&mut self, slices: u32, stacks: u32) -> &EvaluationResult<SyncOutcome> {
        let params = self.viewport.params().clone().with_resolution(slices, stacks);
        let result = self.viewport.set_params(params);
        self.record(result)
    }

    /// Render surface size in pixels.
    pub fn set_size(&mut self, width: u32, height: u32) -> &EvaluationResult<SyncOutcome> {
        let params = self.viewport.params().clone().with_size(width, height);
        let result = self.viewport.set_params(params);
        self.record(result)
    }

    /// Drag input: rotate the camera around the target.
    pub fn orbit(&self, d_theta: f32, d_phi: f32) -> bool {
        self.viewport
            .orbit(|controls, _| controls.rotate(d_theta, d_phi))
    }

    /// Scroll input: move toward (`scale < 1`) or away from the target.
    pub fn zoom(&self, scale: f32) -> bool {
        self.viewport.orbit(|controls, _| controls.zoom(scale))
    }

    fn record(
        &mut self,
        result: Result<SyncOutcome, mathbench_viewport::ViewportError>,
    ) -> &EvaluationResult<SyncOutcome> {
        self.status = match result {
            Ok(outcome) => EvaluationResult::Ready(outcome),
            Err(err) => {
                warn!(%err, "viewport kept its previous surface");
                EvaluationResult::Failed(PanelError::Evaluation(err.to_string()))
            }
        };
        &self.status
    }
}

impl SurfacePanel<SvgBackend> {
    /// Latest frame of the live session as SVG.
    pub fn snapshot(&self) -> Option<String> {
        let surface = self.viewport.with_session(mathbench_viewport::ViewportSession::surface)?;
        self.viewport
            .with_backend(|backend| backend.frame(surface).map(str::to_string))
    }
}
