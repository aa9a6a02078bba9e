// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mathbench_surface::{ExprSurface, SurfaceMesh, SurfacePreset};
use mathbench_viewport::{
    CameraState, ContainerId, GeometryId, LedgerEvent, MaterialDesc, MaterialId, RenderBackend,
    Resource, ResourceLedger, Scene, Size, SurfaceId, SvgBackend, SyncOutcome,
    ViewportController, ViewportError, ViewportParams,
};
use tokio::time::sleep;

/// Counts render calls on top of the SVG backend.
struct Counting {
    inner: SvgBackend,
    renders: Arc<AtomicU64>,
}

impl RenderBackend for Counting {
    fn create_surface(&mut self, size: Size) -> SurfaceId {
        self.inner.create_surface(size)
    }
    fn attach(&mut self, surface: SurfaceId, container: &ContainerId) {
        self.inner.attach(surface, container);
    }
    fn detach(&mut self, surface: SurfaceId, container: &ContainerId) {
        self.inner.detach(surface, container);
    }
    fn release_surface(&mut self, surface: SurfaceId) {
        self.inner.release_surface(surface);
    }
    fn create_geometry(&mut self, mesh: SurfaceMesh) -> GeometryId {
        self.inner.create_geometry(mesh)
    }
    fn dispose_geometry(&mut self, geometry: GeometryId) {
        self.inner.dispose_geometry(geometry);
    }
    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialId {
        self.inner.create_material(desc)
    }
    fn dispose_material(&mut self, material: MaterialId) {
        self.inner.dispose_material(material);
    }
    fn render(&mut self, surface: SurfaceId, scene: &Scene, camera: &CameraState) {
        self.renders.fetch_add(1, Ordering::SeqCst);
        self.inner.render(surface, scene, camera);
    }
}

fn controller() -> (ViewportController<Counting>, ResourceLedger, Arc<AtomicU64>) {
    let inner = SvgBackend::new();
    let ledger = inner.ledger();
    let renders = Arc::new(AtomicU64::new(0));
    let backend = Counting {
        inner,
        renders: Arc::clone(&renders),
    };
    let vc = ViewportController::new(backend).with_frame_interval(Duration::from_millis(16));
    (vc, ledger, renders)
}

fn small() -> ViewportParams {
    ViewportParams::new(SurfacePreset::Sphere).with_resolution(8, 8)
}

fn viewer() -> Option<ContainerId> {
    Some(ContainerId::new("viewer"))
}

#[tokio::test(start_paused = true)]
async fn binding_waits_for_the_container() {
    let (mut vc, ledger, _) = controller();
    assert_eq!(vc.set_params(small()).unwrap(), SyncOutcome::Deferred);
    assert!(ledger.events().is_empty());
    assert!(!vc.is_live());

    assert_eq!(vc.attach_container(viewer()).unwrap(), SyncOutcome::Acquired);
    assert_eq!(ledger.live().len(), 3);
    assert_eq!(ledger.attached(), vec![(SurfaceId(1), ContainerId::new("viewer"))]);

    assert_eq!(vc.set_params(small()).unwrap(), SyncOutcome::Unchanged);
    assert_eq!(vc.sync().unwrap(), SyncOutcome::Unchanged);
    assert_eq!(ledger.live().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn resize_tears_down_in_order_before_rebuilding() {
    let (mut vc, ledger, _) = controller();
    vc.attach_container(viewer()).unwrap();
    vc.set_params(small()).unwrap();
    let before = ledger.events().len();
    // Handles are allocated from one counter in acquisition order.
    let first = vc.with_session(|session| session.surface()).unwrap().0;
    let (s, g, m) = (SurfaceId(first), GeometryId(first + 1), MaterialId(first + 2));
    let (s2, g2, m2) = (SurfaceId(first + 3), GeometryId(first + 4), MaterialId(first + 5));

    assert_eq!(
        vc.set_params(small().with_size(640, 480)).unwrap(),
        SyncOutcome::Acquired
    );
    let container = ContainerId::new("viewer");
    assert_eq!(
        ledger.events()[before..].to_vec(),
        vec![
            LedgerEvent::Detached(s, container.clone()),
            LedgerEvent::Released(Resource::Surface(s)),
            LedgerEvent::Released(Resource::Geometry(g)),
            LedgerEvent::Released(Resource::Material(m)),
            LedgerEvent::Acquired(Resource::Surface(s2)),
            LedgerEvent::Acquired(Resource::Geometry(g2)),
            LedgerEvent::Acquired(Resource::Material(m2)),
            LedgerEvent::Attached(s2, container),
        ]
    );
    for r in [
        Resource::Surface(s),
        Resource::Geometry(g),
        Resource::Material(m),
    ] {
        assert_eq!(ledger.release_count(r), 1);
    }
    assert_eq!(
        vc.with_session(|session| session.size()).unwrap(),
        Size::new(640, 480)
    );
}

#[tokio::test(start_paused = true)]
async fn frames_run_until_unmount() {
    let (mut vc, ledger, renders) = controller();
    vc.set_params(small()).unwrap();
    vc.attach_container(viewer()).unwrap();

    sleep(Duration::from_millis(100)).await;
    assert!(vc.frames_drawn() >= 5, "drew {}", vc.frames_drawn());
    let surface = vc.with_session(|s| s.surface()).unwrap();
    let drawn = vc.with_backend(|b| {
        b.inner
            .frame(surface)
            .is_some_and(|svg| svg.contains("<polygon"))
    });
    assert!(drawn);

    vc.unmount();
    assert!(ledger.is_balanced());
    assert!(vc.container().is_none());

    let after = renders.load(Ordering::SeqCst);
    sleep(Duration::from_millis(100)).await;
    assert_eq!(renders.load(Ordering::SeqCst), after);
}

#[tokio::test(start_paused = true)]
async fn rebuild_leaves_a_single_frame_loop() {
    let (mut vc, _, renders) = controller();
    vc.set_params(small()).unwrap();
    vc.attach_container(viewer()).unwrap();
    sleep(Duration::from_millis(50)).await;

    vc.set_params(small().with_resolution(6, 6)).unwrap();
    let start = renders.load(Ordering::SeqCst);
    sleep(Duration::from_millis(160)).await;
    let delta = renders.load(Ordering::SeqCst) - start;
    assert!((9..=12).contains(&delta), "{delta} renders in 160ms");
}

#[tokio::test(start_paused = true)]
async fn failed_rebuild_keeps_the_live_session() {
    let (mut vc, ledger, _) = controller();
    vc.set_params(small()).unwrap();
    vc.attach_container(viewer()).unwrap();
    let generation = vc.generation();

    let broken = ExprSurface::new("u", "v", "1 / (u - u)").unwrap();
    let err = vc
        .set_params(ViewportParams::new(broken).with_resolution(4, 4))
        .unwrap_err();
    assert!(matches!(err, ViewportError::Surface(_)));
    assert_eq!(vc.generation(), generation);
    assert_eq!(ledger.live().len(), 3);

    assert_eq!(vc.set_params(small()).unwrap(), SyncOutcome::Unchanged);
}

#[tokio::test(start_paused = true)]
async fn moving_to_another_container_detaches_first() {
    let (mut vc, ledger, _) = controller();
    vc.set_params(small()).unwrap();
    vc.attach_container(viewer()).unwrap();
    vc.attach_container(Some(ContainerId::new("sidebar")))
        .unwrap();
    let attached = ledger.attached();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].1, ContainerId::new("sidebar"));
    assert_eq!(ledger.live().len(), 3);

    assert_eq!(vc.attach_container(None).unwrap(), SyncOutcome::Deferred);
    assert!(ledger.is_balanced());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_controller_releases_everything() {
    let (mut vc, ledger, renders) = controller();
    vc.set_params(small()).unwrap();
    vc.attach_container(viewer()).unwrap();
    sleep(Duration::from_millis(40)).await;
    drop(vc);
    assert!(ledger.is_balanced());

    let after = renders.load(Ordering::SeqCst);
    sleep(Duration::from_millis(100)).await;
    assert_eq!(renders.load(Ordering::SeqCst), after);
}

#[tokio::test(start_paused = true)]
async fn orbit_input_moves_the_camera_over_frames() {
    let (mut vc, _, _) = controller();
    vc.set_params(small()).unwrap();
    vc.attach_container(viewer()).unwrap();
    assert!(vc.orbit(|controls, _| controls.rotate(1.0, 0.0)));

    sleep(Duration::from_millis(200)).await;
    let position = vc.with_session(|s| s.camera().position).unwrap();
    assert!(position.x.abs() > 0.1, "camera at {position}");
}
