// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for refresh subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::error::RefreshError;
use crate::types::FullData;

/// Unique identifier for a subscription.
///
/// Returned when subscribing and used to unsubscribe later. IDs are unique
/// within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type RefreshedCallback = Arc<dyn Fn(&FullData) + Send + Sync>;

type RefreshFailedCallback = Arc<dyn Fn(&RefreshError) + Send + Sync>;

/// Registry of refresh callbacks.
///
/// Thread-safe through `parking_lot::RwLock`. Callbacks are cloned out of
/// the map before being called, so a callback may subscribe or unsubscribe
/// without deadlocking.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    refreshed_callbacks: RwLock<HashMap<SubscriptionId, RefreshedCallback>>,
    failed_callbacks: RwLock<HashMap<SubscriptionId, RefreshFailedCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            refreshed_callbacks: RwLock::new(HashMap::new()),
            failed_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback called with each new snapshot.
    pub fn on_refreshed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FullData) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.refreshed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback called with each failed refresh.
    pub fn on_refresh_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RefreshError) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.failed_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.refreshed_callbacks.write().remove(&id).is_some()
            || self.failed_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.refreshed_callbacks.write().clear();
        self.failed_callbacks.write().clear();
    }

    /// Calls every `on_refreshed` callback with the new snapshot.
    pub fn dispatch_refreshed(&self, data: &FullData) {
        let callbacks: Vec<_> = self.refreshed_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(data);
        }
    }

    /// Calls every `on_refresh_failed` callback with the error.
    pub fn dispatch_failed(&self, error: &RefreshError) {
        let callbacks: Vec<_> = self.failed_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(error);
        }
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.refreshed_callbacks.read().len() + self.failed_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
