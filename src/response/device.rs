// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Devices list response parsing.

use serde::Deserialize;

use crate::types::Device;

/// One element of the `GET /user-api/devices` array.
///
/// Fields the library does not use (`notification`, `puk`, ...) are ignored.
///
/// # Examples
///
/// ```
/// use onthemove_lib::response::DeviceResponse;
///
/// let json = r#"[{
///     "id": "D1",
///     "country": "FR",
///     "status": "OK",
///     "tag": "Megane",
///     "user": {"id": "u1", "name": "Bob"},
///     "creation_date": "2024-01-01",
///     "serial_number": "S1",
///     "puk": "12345678"
/// }]"#;
/// let devices: Vec<DeviceResponse> = serde_json::from_str(json).unwrap();
/// let device = devices[0].clone().into_device();
/// assert_eq!(device.id, "D1");
/// assert_eq!(device.user_name, "Bob");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceResponse {
    /// Device identifier.
    pub id: String,
    /// Country code.
    pub country: String,
    /// Provider status.
    pub status: String,
    /// User label.
    pub tag: String,
    /// Owning user.
    pub user: DeviceUser,
    /// Registration date.
    pub creation_date: String,
    /// Serial number.
    pub serial_number: String,
}

/// The `user` object nested in a device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceUser {
    /// User identifier.
    pub id: String,
    /// User display name.
    pub name: String,
}

impl DeviceResponse {
    /// Flattens the wire record into a [`Device`].
    #[must_use]
    pub fn into_device(self) -> Device {
        Device {
            id: self.id,
            country: self.country,
            status: self.status,
            tag: self.tag,
            user_id: self.user.id,
            user_name: self.user.name,
            creation_date: self.creation_date,
            serial_number: self.serial_number,
        }
    }
}
