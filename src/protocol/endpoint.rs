// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provider endpoint paths and header names.

/// Login endpoint (`POST`, Basic auth).
pub const LOGIN: &str = "/user-api/login";

/// Devices list endpoint (`GET`).
pub const DEVICES: &str = "/user-api/devices";

/// Suffix appended to a device path for its consumption history.
pub const CONSUMPTION_SUFFIX: &str = "/consumption";

/// Application identification header.
pub const HEADER_APPLICATION: &str = "x-application";

/// Provider identification header.
pub const HEADER_PROVIDER: &str = "x-provider";

/// Session token header, set by login and sent on every data call.
pub const HEADER_AUTH_TOKEN: &str = "x-auth-token";

/// Returns the consumption path for a device.
///
/// The device id is percent-encoded so it always stays one path segment.
#[must_use]
pub fn consumption(device_id: &str) -> String {
    format!(
        "{DEVICES}/{}{CONSUMPTION_SUFFIX}",
        urlencoding::encode(device_id)
    )
}
