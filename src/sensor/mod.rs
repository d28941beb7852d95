// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor views of the latest plan snapshot.
//!
//! Six sensors describe a plan:
//!
//! | Kind | Name | Value |
//! |------|------|-------|
//! | [`SensorKind::PlanType`] | Plan Type | plan label |
//! | [`SensorKind::StartDate`] | Start date | timestamp |
//! | [`SensorKind::ExpiryDate`] | Expiry date | timestamp |
//! | [`SensorKind::InitialData`] | Initial Data | quota, MB |
//! | [`SensorKind::LeftData`] | Left data | remaining, MB |
//! | [`SensorKind::LeftDataPercentage`] | Left data percentage | remaining, % |
//!
//! # Examples
//!
//! ```no_run
//! use onthemove_lib::RefreshCoordinator;
//! use onthemove_lib::sensor::sensors;
//!
//! # async fn example() -> onthemove_lib::Result<()> {
//! let (coordinator, _) = RefreshCoordinator::builder("bob", "secret").build().await?;
//!
//! for sensor in sensors(&coordinator) {
//!     if let Some(value) = sensor.state() {
//!         println!("{}: {value}", sensor.name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod entity;
mod kind;

pub use entity::{DeviceInfo, PlanSensor};
pub use kind::{DeviceClass, SensorKind, SensorValue, StateClass, UNIT_MEGABYTES, UNIT_PERCENT};

use std::sync::Arc;

use crate::coordinator::RefreshCoordinator;
use crate::protocol::PlanApi;

/// Creates the six plan sensors for a coordinator.
#[must_use]
pub fn sensors<A: PlanApi>(coordinator: &Arc<RefreshCoordinator<A>>) -> Vec<PlanSensor<A>> {
    SensorKind::ALL
        .iter()
        .map(|&kind| PlanSensor::new(kind, Arc::clone(coordinator)))
        .collect()
}
