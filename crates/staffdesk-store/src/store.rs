//! Snapshot store with whole-value replacement
//!
//! [`MockStore`] holds one [`Snapshot`] at a time. The only write is
//! [`MockStore::replace`], which swaps the entire value; concurrent writers
//! race and the last one wins. Readers either poll [`MockStore::get`] or hold a
//! [`Subscription`] that observes each replacement.

use crate::error::StoreError;
use crate::seed;
use crate::snapshot::Snapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// In-memory snapshot store
#[derive(Debug)]
pub struct MockStore {
    sender: watch::Sender<Arc<Snapshot>>,
    revision: AtomicU64,
}

impl MockStore {
    /// Create store holding `initial`
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            sender,
            revision: AtomicU64::new(0),
        }
    }

    /// Create store holding the seed dataset
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::initial_snapshot())
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn get(&self) -> Arc<Snapshot> {
        Arc::clone(&self.sender.borrow())
    }

    /// Number of replacements so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Swap in a new snapshot, returning its revision
    ///
    /// Never rejects: consistency findings are logged and the snapshot is
    /// stored as given.
    pub fn replace(&self, snapshot: Snapshot) -> u64 {
        let audit = snapshot.audit();
        if !audit.is_clean() {
            tracing::warn!(
                findings = audit.len(),
                "replacing snapshot with inconsistencies: {}",
                audit
            );
        }

        let counts = (
            snapshot.entities.len(),
            snapshot.brands.len(),
            snapshot.locations.len(),
            snapshot.employees.len(),
        );

        let mut revision = 0;
        self.sender.send_modify(|current| {
            *current = Arc::new(snapshot);
            revision = self.revision.fetch_add(1, Ordering::AcqRel) + 1;
        });

        tracing::info!(
            revision,
            entities = counts.0,
            brands = counts.1,
            locations = counts.2,
            employees = counts.3,
            "snapshot replaced"
        );
        revision
    }

    /// Subscribe to replacements; the current snapshot counts as seen
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions
    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Observer of snapshot replacements
///
/// Replacements made between two observations coalesce: a subscriber always
/// sees the latest snapshot, never a backlog.
#[derive(Debug, Clone)]
pub struct Subscription {
    receiver: watch::Receiver<Arc<Snapshot>>,
}

impl Subscription {
    /// Latest snapshot, without marking it seen
    #[must_use]
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.receiver.borrow())
    }

    /// Check if a replacement happened since the last observation
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Latest snapshot if it was replaced since the last observation
    pub fn next_if_changed(&mut self) -> Option<Arc<Snapshot>> {
        if self.has_changed() {
            Some(Arc::clone(&self.receiver.borrow_and_update()))
        } else {
            None
        }
    }

    /// Wait for the next replacement
    ///
    /// # Errors
    /// Returns `Closed` if the store is dropped first
    pub async fn changed(&mut self) -> Result<Arc<Snapshot>, StoreError> {
        self.receiver.changed().await.map_err(|_| StoreError::Closed)?;
        Ok(Arc::clone(&self.receiver.borrow_and_update()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffdesk_model::Status;

    #[test]
    fn replace_is_visible_to_next_get() {
        let store = MockStore::seeded();
        assert_eq!(store.revision(), 0);

        let next = store.get().with_employee_status("u-1002", Status::Inactive).unwrap();
        assert_eq!(store.replace(next.clone()), 1);
        assert_eq!(*store.get(), next);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn replace_accepts_inconsistent_snapshot() {
        let store = MockStore::seeded();
        let mut broken = (*store.get()).clone();
        broken.employees[0].bid = "b-missing".into();

        store.replace(broken.clone());
        assert_eq!(*store.get(), broken);
    }

    #[test]
    fn subscription_coalesces_replacements() {
        let store = MockStore::seeded();
        let mut subscription = store.subscribe();
        assert!(!subscription.has_changed());
        assert!(subscription.next_if_changed().is_none());

        store.replace(Snapshot::default());
        let last = store.get().with_employee(crate::seed::initial_snapshot().employees[0].clone());
        store.replace(last.clone());

        assert!(subscription.has_changed());
        assert_eq!(*subscription.next_if_changed().unwrap(), last);
        assert!(!subscription.has_changed());
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn get_does_not_mark_subscribers_seen() {
        let store = MockStore::seeded();
        let subscription = store.subscribe();
        store.replace(Snapshot::default());

        let _ = store.get();
        let _ = subscription.current();
        assert!(subscription.has_changed());
    }
}
