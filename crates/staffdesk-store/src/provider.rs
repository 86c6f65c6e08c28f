//! Provider scope for the mock store
//!
//! A [`MockProvider`] owns the store for its lifetime. Consumers hold a
//! [`MockContext`], which reaches the store only while the provider is alive.
//! Any access through a context outside that scope fails with
//! [`StoreError::OutsideProvider`].

use crate::error::StoreError;
use crate::snapshot::Snapshot;
use crate::store::{MockStore, Subscription};
use std::sync::{Arc, Weak};

/// Owner of a [`MockStore`]
#[derive(Debug)]
pub struct MockProvider {
    store: Arc<MockStore>,
}

impl MockProvider {
    /// Create provider around a store holding `initial`
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        Self {
            store: Arc::new(MockStore::new(initial)),
        }
    }

    /// Create provider around the seed dataset
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            store: Arc::new(MockStore::seeded()),
        }
    }

    /// Handle for consumers inside this provider's scope
    #[must_use]
    pub fn context(&self) -> MockContext {
        MockContext {
            store: Arc::downgrade(&self.store),
        }
    }

    /// The owned store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &MockStore {
        &self.store
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Consumer handle to a provider's store
#[derive(Debug, Clone, Default)]
pub struct MockContext {
    store: Weak<MockStore>,
}

impl MockContext {
    /// Context attached to no provider; every access fails
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Check if the owning provider is still alive
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.store.strong_count() > 0
    }

    fn store(&self) -> Result<Arc<MockStore>, StoreError> {
        self.store.upgrade().ok_or_else(|| {
            tracing::error!("mock store accessed outside of a MockProvider");
            StoreError::OutsideProvider
        })
    }

    /// Current snapshot
    ///
    /// # Errors
    /// Returns `OutsideProvider` if the provider is gone
    pub fn get(&self) -> Result<Arc<Snapshot>, StoreError> {
        Ok(self.store()?.get())
    }

    /// Swap in a new snapshot, returning its revision
    ///
    /// # Errors
    /// Returns `OutsideProvider` if the provider is gone
    pub fn replace(&self, snapshot: Snapshot) -> Result<u64, StoreError> {
        Ok(self.store()?.replace(snapshot))
    }

    /// Number of replacements so far
    ///
    /// # Errors
    /// Returns `OutsideProvider` if the provider is gone
    pub fn revision(&self) -> Result<u64, StoreError> {
        Ok(self.store()?.revision())
    }

    /// Subscribe to replacements
    ///
    /// # Errors
    /// Returns `OutsideProvider` if the provider is gone
    pub fn subscribe(&self) -> Result<Subscription, StoreError> {
        Ok(self.store()?.subscribe())
    }
}
