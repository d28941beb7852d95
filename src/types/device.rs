// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The SIM/device a data plan belongs to.

use serde::Serialize;

/// A device registered on the provider account.
///
/// Only the first device returned by the devices endpoint is tracked. A new
/// value is built on every refresh; it is never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    /// Provider identifier, used to build the consumption URL.
    pub id: String,
    /// Country code of the subscription.
    pub country: String,
    /// Provider status string (e.g. `"OK"`).
    pub status: String,
    /// User-defined label of the device.
    pub tag: String,
    /// Identifier of the owning user.
    pub user_id: String,
    /// Display name of the owning user.
    pub user_name: String,
    /// Registration date as sent by the provider.
    pub creation_date: String,
    /// Serial number of the SIM/device.
    pub serial_number: String,
}
