// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device consumption response parsing.

use serde::Deserialize;

use crate::types::ConsumptionOfDevice;

/// One element of the `GET /user-api/devices/{id}/consumption` array.
///
/// The provider returns the consumption history newest first; only the
/// first element is used.
///
/// # Examples
///
/// ```
/// use onthemove_lib::response::ConsumptionResponse;
///
/// let json = r#"[{
///     "type": "Flex",
///     "initial_data": 3145728,
///     "left_data": 2411724,
///     "expiry_date": "2024-06-01",
///     "start_date": "2024-01-01"
/// }]"#;
/// let history: Vec<ConsumptionResponse> = serde_json::from_str(json).unwrap();
/// assert_eq!(history[0].left_data, 2_411_724);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumptionResponse {
    /// Plan type.
    #[serde(rename = "type")]
    pub plan_type: String,
    /// Quota in kilobytes.
    pub initial_data: u64,
    /// Remaining data in kilobytes.
    pub left_data: u64,
    /// Plan end.
    pub expiry_date: String,
    /// Plan start.
    pub start_date: String,
}

impl ConsumptionResponse {
    /// Converts the wire record into a [`ConsumptionOfDevice`].
    #[must_use]
    pub fn into_consumption(self) -> ConsumptionOfDevice {
        ConsumptionOfDevice {
            plan_type: self.plan_type,
            initial_data: self.initial_data,
            left_data: self.left_data,
            expiry_date: self.expiry_date,
            start_date: self.start_date,
        }
    }
}
