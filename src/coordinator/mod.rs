// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Refresh coordination and scheduling.
//!
//! - [`RefreshCoordinator`]: runs one login → device → consumption cycle at
//!   a time and caches the last [`FullData`](crate::types::FullData)
//! - [`Poller`]: refreshes a coordinator on its update interval
//! - [`CoordinatorBuilder`]: sets up an HTTP-backed coordinator in one call

mod builder;
#[cfg(test)]
pub(crate) mod fake;
mod poller;
mod refresh;

pub use builder::CoordinatorBuilder;
pub use poller::{Poller, PollerExit, PollerHandle};
pub use refresh::RefreshCoordinator;
