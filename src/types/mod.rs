// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Domain values produced by a refresh.
//!
//! # Types
//!
//! - [`Device`] - The first device of the account
//! - [`ConsumptionOfDevice`] - Plan type, quota, remaining data and dates
//! - [`FullData`] - One device plus its consumption
//! - [`PlanDate`] - Parsed plan start/expiry date

mod consumption;
mod device;
mod full_data;
mod plan_date;

pub use consumption::{ConsumptionOfDevice, KILOBYTES_PER_MEGABYTE};
pub use device::Device;
pub use full_data::FullData;
pub use plan_date::{PlanDate, PlanDateParseError};
