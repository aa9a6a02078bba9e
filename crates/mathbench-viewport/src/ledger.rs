// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record of backend acquisitions and releases.

use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{ContainerId, GeometryId, MaterialId, SurfaceId};

/// A backend-owned resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Render surface.
    Surface(SurfaceId),
    /// Mesh.
    Geometry(GeometryId),
    /// Material.
    Material(MaterialId),
}

/// One lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Resource created.
    Acquired(Resource),
    /// Resource freed.
    Released(Resource),
    /// Release of a handle that was never acquired or already released.
    UnknownRelease(Resource),
    /// Surface output shown in a container.
    Attached(SurfaceId, ContainerId),
    /// Surface output removed from a container.
    Detached(SurfaceId, ContainerId),
}

/// Shared, append-only event log.
///
/// Clones share the same log so a test can keep a handle after the backend
/// moves into a controller.
#[derive(Clone, Debug, Default)]
pub struct ResourceLedger {
    events: Arc<Mutex<Vec<LedgerEvent>>>,
}

impl ResourceLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, event: LedgerEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resources acquired and not yet released, in acquisition order.
    pub fn live(&self) -> Vec<Resource> {
        let mut live = Vec::new();
        for event in self.events() {
            match event {
                LedgerEvent::Acquired(r) => live.push(r),
                LedgerEvent::Released(r) => live.retain(|l| *l != r),
                _ => {}
            }
        }
        live
    }

    /// Number of times `resource` was released (including unknown releases).
    pub fn release_count(&self, resource: Resource) -> usize {
        self.events()
            .iter()
            .filter(|e| {
                matches!(e, LedgerEvent::Released(r) | LedgerEvent::UnknownRelease(r) if *r == resource)
            })
            .count()
    }

    /// Surfaces currently attached, with their containers.
    pub fn attached(&self) -> Vec<(SurfaceId, ContainerId)> {
        let mut attached = Vec::new();
        for event in self.events() {
            match event {
                LedgerEvent::Attached(s, c) => attached.push((s, c)),
                LedgerEvent::Detached(s, c) => attached.retain(|a| *a != (s, c.clone())),
                _ => {}
            }
        }
        attached
    }

    /// No live resources, no attached surfaces, no bad releases.
    pub fn is_balanced(&self) -> bool {
        self.live().is_empty()
            && self.attached().is_empty()
            && !self
                .events()
                .iter()
                .any(|e| matches!(e, LedgerEvent::UnknownRelease(_)))
    }
}
