// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data consumption figures of a device.

use serde::Serialize;

use super::PlanDate;

/// Number of kilobytes in a megabyte, as the provider counts them.
pub const KILOBYTES_PER_MEGABYTE: u64 = 1024;

/// Current plan and consumption of a device.
///
/// Data amounts are in kilobytes. `left_data <= initial_data` is expected
/// but not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumptionOfDevice {
    /// Plan or contract type (e.g. `"Flex"`).
    #[serde(rename = "type")]
    pub plan_type: String,
    /// Data quota of the plan.
    pub initial_data: u64,
    /// Data remaining on the plan.
    pub left_data: u64,
    /// End of the plan, as sent by the provider.
    pub expiry_date: String,
    /// Start of the plan, as sent by the provider.
    pub start_date: String,
}

impl ConsumptionOfDevice {
    /// Remaining data as a whole percentage of the quota, rounded down.
    ///
    /// Returns `None` for a zero quota.
    ///
    /// # Examples
    ///
    /// ```
    /// use onthemove_lib::types::ConsumptionOfDevice;
    ///
    /// let consumption = ConsumptionOfDevice {
    ///     plan_type: "Flex".to_string(),
    ///     initial_data: 3_145_728,
    ///     left_data: 2_411_724,
    ///     expiry_date: "2024-06-01".to_string(),
    ///     start_date: "2024-01-01".to_string(),
    /// };
    /// assert_eq!(consumption.left_percentage(), Some(76));
    /// ```
    #[must_use]
    pub fn left_percentage(&self) -> Option<u64> {
        if self.initial_data == 0 {
            return None;
        }
        let percent = u128::from(self.left_data) * 100 / u128::from(self.initial_data);
        Some(u64::try_from(percent).unwrap_or(u64::MAX))
    }

    /// Data quota in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn initial_megabytes(&self) -> f64 {
        self.initial_data as f64 / KILOBYTES_PER_MEGABYTE as f64
    }

    /// Remaining data in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn left_megabytes(&self) -> f64 {
        self.left_data as f64 / KILOBYTES_PER_MEGABYTE as f64
    }

    /// Parsed start date, if the provider sent a recognized format.
    #[must_use]
    pub fn start(&self) -> Option<PlanDate> {
        PlanDate::parse(&self.start_date)
    }

    /// Parsed expiry date, if the provider sent a recognized format.
    #[must_use]
    pub fn expiry(&self) -> Option<PlanDate> {
        PlanDate::parse(&self.expiry_date)
    }
}
