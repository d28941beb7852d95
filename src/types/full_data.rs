// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot produced by one successful refresh.

use serde::Serialize;

use super::{ConsumptionOfDevice, Device};

/// A device together with its consumption, as fetched by one refresh.
///
/// Every sensor reads from the same snapshot, so all sensor values always
/// come from a single refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullData {
    /// The tracked device.
    pub device: Device,
    /// Consumption of [`device`](Self::device).
    pub consumption: ConsumptionOfDevice,
}

impl FullData {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub fn new(device: Device, consumption: ConsumptionOfDevice) -> Self {
        Self {
            device,
            consumption,
        }
    }
}
