// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for refresh outcomes.
//!
//! - [`SubscriptionId`] - Identifier used to unsubscribe
//! - [`CallbackRegistry`] - Stores and dispatches callbacks
//! - [`Subscribable`] - Trait implemented by the refresh coordinator
//!
//! Callbacks run synchronously on the task that completed the refresh, in
//! arbitrary order. Keep them short.

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use subscribable::Subscribable;
