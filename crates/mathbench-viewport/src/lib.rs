// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewport lifecycle for the Mathbench surface viewer.
//!
//! [`ViewportController`] binds a render context to a container: it acquires
//! a surface, mesh and material when the container appears or a tracked
//! parameter changes, redraws on a cancellable [`FrameLoop`](mathbench_sched::FrameLoop),
//! and releases everything in a fixed order (detach, surface, geometry,
//! material) before rebuilding or on unmount.
//!
//! Rendering goes through the [`RenderBackend`] port; [`SvgBackend`] is a
//! software implementation that keeps a [`ResourceLedger`] of every
//! acquisition and release.

mod backend;
mod camera;
mod controller;
mod controls;
mod error;
mod ledger;
mod params;
mod scene;
mod session;
mod svg;

pub use backend::{ContainerId, GeometryId, MaterialId, RenderBackend, Size, SurfaceId};
pub use camera::CameraState;
pub use controller::{SyncOutcome, ViewportController};
pub use controls::{OrbitControls, DEFAULT_DAMPING};
pub use error::ViewportError;
pub use ledger::{LedgerEvent, Resource, ResourceLedger};
pub use params::{Resolution, ViewportParams};
pub use scene::{DirectionalLight, MaterialDesc, Rgb, Scene};
pub use session::ViewportSession;
pub use svg::SvgBackend;
