//! Scoped provider for the shared snapshot.
//!
//! Background fetchers write here; the UI loop reads the current value and
//! notices changes through the generation counter. Signing out clears the
//! session instead of leaving it in a global.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::{Location, Session, Snapshot};

struct Inner {
    snapshot: Arc<Snapshot>,
    generation: u64,
}

#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                snapshot: Arc::new(snapshot),
                generation: 0,
            })),
        }
    }

    /// Current snapshot. Cheap: clones an `Arc`.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.read().snapshot)
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Apply `change` to a copy of the snapshot and publish it atomically.
    /// Returns the new generation.
    pub fn update(&self, change: impl FnOnce(&mut Snapshot)) -> u64 {
        let mut guard = self.inner.write();
        let mut next = (*guard.snapshot).clone();
        change(&mut next);
        guard.snapshot = Arc::new(next);
        guard.generation += 1;
        guard.generation
    }

    pub fn replace(&self, snapshot: Snapshot) -> u64 {
        self.update(|current| *current = snapshot)
    }

    pub fn set_session(&self, session: Session) -> u64 {
        info!(account = %session.account, "session established");
        self.update(|snapshot| snapshot.session = Some(session))
    }

    pub fn set_location(&self, location: Location) -> u64 {
        info!(city = %location.city, "location set");
        self.update(|snapshot| snapshot.location = Some(location))
    }

    pub fn sign_out(&self) -> u64 {
        info!("signed out");
        self.update(|snapshot| snapshot.session = None)
    }
}
