// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensors bound to a shared coordinator.

use std::sync::Arc;

use crate::coordinator::RefreshCoordinator;
use crate::protocol::PlanApi;
use crate::sensor::{DeviceClass, SensorKind, SensorValue, StateClass};
use crate::types::Device;

/// Device record grouping the sensors of one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device id, used as identifier.
    pub identifier: String,
    /// Display name.
    pub name: String,
    /// Manufacturer label.
    pub manufacturer: String,
    /// Model, the device tag.
    pub model: String,
    /// Hardware version, the device serial number.
    pub hw_version: String,
}

impl DeviceInfo {
    /// Describes `device` as sold by Orange for `provider`.
    #[must_use]
    pub fn new(device: &Device, provider: &str) -> Self {
        Self {
            identifier: device.id.clone(),
            name: format!("Data Plan of {} for {}", device.user_name, device.tag),
            manufacturer: format!("Orange for {provider}"),
            model: device.tag.clone(),
            hw_version: device.serial_number.clone(),
        }
    }
}

/// One sensor reading from a shared [`RefreshCoordinator`].
///
/// The sensor holds no data of its own: every read goes to the
/// coordinator's current snapshot.
#[derive(Debug)]
pub struct PlanSensor<A> {
    kind: SensorKind,
    coordinator: Arc<RefreshCoordinator<A>>,
}

impl<A> Clone for PlanSensor<A> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<A: PlanApi> PlanSensor<A> {
    /// Creates a sensor of `kind` reading from `coordinator`.
    #[must_use]
    pub fn new(kind: SensorKind, coordinator: Arc<RefreshCoordinator<A>>) -> Self {
        Self { kind, coordinator }
    }

    /// Returns the sensor kind.
    #[must_use]
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns `{device_id}_{suffix}`, or `None` before the first
    /// successful refresh.
    #[must_use]
    pub fn unique_id(&self) -> Option<String> {
        self.coordinator
            .current()
            .map(|data| format!("{}_{}", data.device.id, self.kind.suffix()))
    }

    /// Returns the unit of measurement, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&'static str> {
        self.kind.unit()
    }

    /// Returns the icon, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&'static str> {
        self.kind.icon()
    }

    /// Returns the device class, if any.
    #[must_use]
    pub fn device_class(&self) -> Option<DeviceClass> {
        self.kind.device_class()
    }

    /// Returns the state class, if any.
    #[must_use]
    pub fn state_class(&self) -> Option<StateClass> {
        self.kind.state_class()
    }

    /// Returns the current value.
    #[must_use]
    pub fn state(&self) -> Option<SensorValue> {
        self.coordinator
            .current()
            .and_then(|data| self.kind.value(&data))
    }

    /// Returns `true` once data is available and the last refresh succeeded.
    #[must_use]
    pub fn available(&self) -> bool {
        self.coordinator.current().is_some() && self.coordinator.last_error().is_none()
    }

    /// Returns the device this sensor belongs to, once known.
    #[must_use]
    pub fn device_info(&self) -> Option<DeviceInfo> {
        self.coordinator
            .current()
            .map(|data| DeviceInfo::new(&data.device, self.coordinator.api().provider()))
    }
}
