//! In-process snapshot cache.
//!
//! Holds the most recently loaded or reconciled [`Snapshot`]. Readers get a
//! shared immutable snapshot; writers publish a whole new one.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{EngineError, EngineResult};
use crate::models::Snapshot;

/// Shared cache of the current [`Snapshot`].
///
/// Cloning the cache yields another handle to the same value. Until the first
/// [`publish`](SnapshotCache::publish) the cache is "not ready".
///
/// # Example
///
/// ```
/// use payroll_engine::models::Snapshot;
/// use payroll_engine::reconcile::SnapshotCache;
///
/// let cache = SnapshotCache::new();
/// assert!(cache.current().is_none());
///
/// cache.publish(Snapshot::default());
/// assert!(cache.current().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    sender: Arc<watch::Sender<Option<Arc<Snapshot>>>>,
}

impl SnapshotCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns the current snapshot, if one has been published.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.sender.borrow().clone()
    }

    /// Returns the current snapshot or [`EngineError::SnapshotNotReady`].
    pub fn require(&self) -> EngineResult<Arc<Snapshot>> {
        self.current().ok_or(EngineError::SnapshotNotReady)
    }

    /// Returns true once a snapshot has been published.
    pub fn is_ready(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Subscribes to snapshot publications.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.sender.subscribe()
    }

    /// Replaces the cached snapshot.
    ///
    /// Snapshots already handed out are unaffected.
    pub fn publish(&self, snapshot: Snapshot) {
        self.sender.send_replace(Some(Arc::new(snapshot)));
    }

    /// Applies `update` to a copy of the current snapshot and publishes it.
    ///
    /// The copy is taken and swapped in under the channel's write lock, so
    /// concurrent publishers cannot interleave between the read and the
    /// write. Fails with [`EngineError::SnapshotNotReady`] on an empty cache.
    pub fn update<F>(&self, update: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Snapshot),
    {
        let mut result = Err(EngineError::SnapshotNotReady);
        self.sender.send_if_modified(|slot| match slot {
            Some(current) => {
                let mut next = Snapshot::clone(current);
                update(&mut next);
                *slot = Some(Arc::new(next));
                result = Ok(());
                true
            }
            None => false,
        });
        result
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
