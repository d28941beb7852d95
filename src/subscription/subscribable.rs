// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that publish refresh outcomes.

use crate::error::RefreshError;
use crate::subscription::SubscriptionId;
use crate::types::FullData;

/// Trait for types that notify observers about refresh outcomes.
///
/// Implemented by the refresh coordinator. Presentation layers subscribe
/// here instead of polling [`current`](crate::RefreshCoordinator::current).
///
/// # Examples
///
/// ```no_run
/// use onthemove_lib::{RefreshCoordinator, Subscribable};
///
/// # async fn example() -> onthemove_lib::Result<()> {
/// let (coordinator, _) = RefreshCoordinator::builder("bob", "secret")
///     .build()
///     .await?;
///
/// let sub_id = coordinator.on_refreshed(|data| {
///     println!("{} KB left", data.consumption.left_data);
/// });
///
/// coordinator.on_refresh_failed(|err| {
///     if err.is_auth_failure() {
///         eprintln!("credentials rejected, please re-enter them");
///     }
/// });
///
/// coordinator.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to successful refreshes.
    ///
    /// The callback receives the new snapshot.
    fn on_refreshed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FullData) + Send + Sync + 'static;

    /// Subscribes to failed refreshes.
    ///
    /// The callback receives the classified error.
    fn on_refresh_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RefreshError) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
