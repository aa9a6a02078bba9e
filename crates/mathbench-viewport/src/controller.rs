// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewport lifecycle controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mathbench_sched::{FrameControl, FrameLoop, DEFAULT_FRAME_INTERVAL};
use tracing::{debug, trace};

use crate::backend::{ContainerId, RenderBackend};
use crate::camera::CameraState;
use crate::controls::{OrbitControls, DEFAULT_DAMPING};
use crate::error::ViewportError;
use crate::params::ViewportParams;
use crate::session::ViewportSession;

/// What a sync did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No container yet; the params are kept for later.
    Deferred,
    /// A session for these params and container is already live.
    Unchanged,
    /// The previous session (if any) was torn down and a new one acquired.
    Acquired,
}

#[derive(Debug)]
struct Shared<B> {
    backend: B,
    session: Option<ViewportSession>,
}

fn lock<B>(shared: &Mutex<Shared<B>>) -> MutexGuard<'_, Shared<B>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Draw one frame if `generation` is still the live session.
fn frame_step<B: RenderBackend>(shared: &Mutex<Shared<B>>, generation: u64) -> FrameControl {
    let mut guard = lock(shared);
    let Shared { backend, session } = &mut *guard;
    match session {
        Some(s) if s.generation() == generation => {
            s.frame(backend);
            FrameControl::Continue
        }
        _ => {
            trace!(generation, "stale frame callback");
            FrameControl::Stop
        }
    }
}

/// Owns the render session bound to one container.
///
/// The session is (re)built whenever the container appears or a tracked
/// parameter changes, and torn down before any rebuild and on unmount, so
/// at most one session is ever live. A frame loop redraws the live session
/// until it is cancelled.
#[derive(Debug)]
pub struct ViewportController<B: RenderBackend> {
    shared: Arc<Mutex<Shared<B>>>,
    container: Option<ContainerId>,
    params: ViewportParams,
    live: Option<(ContainerId, ViewportParams)>,
    frames: Option<FrameLoop>,
    frame_interval: Duration,
    damping: f32,
    next_generation: u64,
}

impl<B: RenderBackend> ViewportController<B> {
    /// Controller with default params and no container.
    pub fn new(backend: B) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                backend,
                session: None,
            })),
            container: None,
            params: ViewportParams::default(),
            live: None,
            frames: None,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            damping: DEFAULT_DAMPING,
            next_generation: 0,
        }
    }

    /// Redraw interval for sessions acquired from now on.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Orbit damping for sessions acquired from now on.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Requested params.
    pub fn params(&self) -> &ViewportParams {
        &self.params
    }

    /// Current container, if bound.
    pub fn container(&self) -> Option<&ContainerId> {
        self.container.as_ref()
    }

    /// Whether a session is live.
    pub fn is_live(&self) -> bool {
        lock(&self.shared).session.is_some()
    }

    /// Generation of the live session.
    pub fn generation(&self) -> Option<u64> {
        lock(&self.shared).session.as_ref().map(ViewportSession::generation)
    }

    /// Frames drawn by the live session.
    pub fn frames_drawn(&self) -> u64 {
        lock(&self.shared)
            .session
            .as_ref()
            .map_or(0, ViewportSession::frames)
    }

    /// Inspect the backend.
    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&lock(&self.shared).backend)
    }

    /// Inspect the live session.
    pub fn with_session<R>(&self, f: impl FnOnce(&ViewportSession) -> R) -> Option<R> {
        lock(&self.shared).session.as_ref().map(f)
    }

    /// Queue orbit input on the live session. Returns false when none is live.
    pub fn orbit(&self, input: impl FnOnce(&mut OrbitControls, &CameraState)) -> bool {
        let mut guard = lock(&self.shared);
        match guard.session.as_mut() {
            Some(session) => {
                let (controls, camera) = session.controls_mut();
                input(controls, camera);
                true
            }
            None => false,
        }
    }

    /// Draw one frame outside the frame loop. Returns false when nothing is live.
    pub fn render_frame(&self) -> bool {
        let mut guard = lock(&self.shared);
        let Shared { backend, session } = &mut *guard;
        match session {
            Some(s) => {
                s.frame(backend);
                true
            }
            None => false,
        }
    }

    /// Tear down the session and forget the container.
    pub fn unmount(&mut self) {
        self.teardown();
        if let Some(container) = self.container.take() {
            debug!(%container, "viewport unmounted");
        }
    }

    /// Cancel the frame loop, then detach and release the session.
    fn teardown(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        let mut guard = lock(&self.shared);
        let Shared { backend, session } = &mut *guard;
        if let Some(session) = session.take() {
            session.teardown(backend);
        }
        self.live = None;
    }
}

impl<B: RenderBackend + Send + 'static> ViewportController<B> {
    /// Bind (or unbind, with `None`) the container and sync.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach_container(
        &mut self,
        container: Option<ContainerId>,
    ) -> Result<SyncOutcome, ViewportError> {
        if container.is_none() {
            self.unmount();
            return Ok(SyncOutcome::Deferred);
        }
        self.container = container;
        self.sync()
    }

    /// Replace the tracked params and sync.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_params(&mut self, params: ViewportParams) -> Result<SyncOutcome, ViewportError> {
        self.params = params;
        self.sync()
    }

    /// Make the live session match the container and params.
    ///
    /// The new mesh is built before anything is torn down; if that fails the
    /// previous session stays live and the error is returned.
    pub fn sync(&mut self) -> Result<SyncOutcome, ViewportError> {
        let Some(container) = self.container.clone() else {
            debug!("no container, deferring viewport acquisition");
            return Ok(SyncOutcome::Deferred);
        };
        if self
            .live
            .as_ref()
            .is_some_and(|(c, p)| *c == container && *p == self.params)
        {
            return Ok(SyncOutcome::Unchanged);
        }

        let res = self.params.resolution;
        let mesh = self.params.source.tessellate(res.slices, res.stacks)?;

        self.teardown();
        self.next_generation += 1;
        let generation = self.next_generation;
        {
            let mut guard = lock(&self.shared);
            let session = ViewportSession::acquire(
                &mut guard.backend,
                container.clone(),
                self.params.size,
                mesh,
                self.damping,
                generation,
            );
            guard.session = Some(session);
        }
        debug!(
            generation,
            source = %self.params.source.key(),
            "viewport synced"
        );
        self.live = Some((container, self.params.clone()));

        let shared = Arc::clone(&self.shared);
        self.frames = Some(FrameLoop::spawn(self.frame_interval, move |_| {
            frame_step(&shared, generation)
        }));
        Ok(SyncOutcome::Acquired)
    }
}

impl<B: RenderBackend> Drop for ViewportController<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
