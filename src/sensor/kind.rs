// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The six plan sensors and their static metadata.

use std::fmt;

use crate::types::{FullData, PlanDate};

/// Unit of the megabyte sensors.
pub const UNIT_MEGABYTES: &str = "MB";
/// Unit of the percentage sensor.
pub const UNIT_PERCENT: &str = "%";

/// Kind of plan sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Plan type label.
    PlanType,
    /// Plan start date.
    StartDate,
    /// Plan expiry date.
    ExpiryDate,
    /// Plan quota in megabytes.
    InitialData,
    /// Remaining data in megabytes.
    LeftData,
    /// Remaining data as a whole percentage of the quota.
    LeftDataPercentage,
}

/// Device class reported by a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// A point in time.
    Timestamp,
    /// An amount of data.
    DataSize,
}

/// State class reported by a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    /// A value measured at the time of the refresh.
    Measurement,
}

/// A sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    /// Free text.
    Text(String),
    /// Amount of data in megabytes.
    Megabytes(f64),
    /// Whole percentage, rounded down.
    Percent(u64),
    /// A point in time.
    Timestamp(PlanDate),
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Megabytes(mb) => write!(f, "{mb} {UNIT_MEGABYTES}"),
            Self::Percent(percent) => write!(f, "{percent}{UNIT_PERCENT}"),
            Self::Timestamp(date) => write!(f, "{date}"),
        }
    }
}

impl SensorKind {
    /// All kinds, in the order sensors are created.
    pub const ALL: [Self; 6] = [
        Self::PlanType,
        Self::StartDate,
        Self::ExpiryDate,
        Self::InitialData,
        Self::LeftData,
        Self::LeftDataPercentage,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlanType => "Plan Type",
            Self::StartDate => "Start date",
            Self::ExpiryDate => "Expiry date",
            Self::InitialData => "Initial Data",
            Self::LeftData => "Left data",
            Self::LeftDataPercentage => "Left data percentage",
        }
    }

    /// Suffix appended to the device id to form the unique id.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::PlanType => "plan_type",
            Self::StartDate => "start_date",
            Self::ExpiryDate => "expiry_date",
            Self::InitialData => "initial_data",
            Self::LeftData => "left_data",
            Self::LeftDataPercentage => "left_data_percentage",
        }
    }

    /// Unit of measurement, if any.
    #[must_use]
    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::InitialData | Self::LeftData => Some(UNIT_MEGABYTES),
            Self::LeftDataPercentage => Some(UNIT_PERCENT),
            Self::PlanType | Self::StartDate | Self::ExpiryDate => None,
        }
    }

    /// Icon name, if the sensor overrides the default one.
    #[must_use]
    pub const fn icon(self) -> Option<&'static str> {
        match self {
            Self::PlanType => Some("mdi:file-sign"),
            Self::LeftDataPercentage => Some("mdi:gauge"),
            _ => None,
        }
    }

    /// Device class, if any.
    #[must_use]
    pub const fn device_class(self) -> Option<DeviceClass> {
        match self {
            Self::StartDate | Self::ExpiryDate => Some(DeviceClass::Timestamp),
            Self::InitialData | Self::LeftData => Some(DeviceClass::DataSize),
            Self::PlanType | Self::LeftDataPercentage => None,
        }
    }

    /// State class, if any.
    #[must_use]
    pub const fn state_class(self) -> Option<StateClass> {
        match self {
            Self::InitialData | Self::LeftData => Some(StateClass::Measurement),
            _ => None,
        }
    }

    /// Reads this sensor's value from a snapshot.
    ///
    /// Returns `None` for an unparsable date or a zero quota.
    #[must_use]
    pub fn value(self, data: &FullData) -> Option<SensorValue> {
        let consumption = &data.consumption;
        match self {
            Self::PlanType => Some(SensorValue::Text(consumption.plan_type.clone())),
            Self::StartDate => consumption.start().map(SensorValue::Timestamp),
            Self::ExpiryDate => consumption.expiry().map(SensorValue::Timestamp),
            Self::InitialData => Some(SensorValue::Megabytes(consumption.initial_megabytes())),
            Self::LeftData => Some(SensorValue::Megabytes(consumption.left_megabytes())),
            Self::LeftDataPercentage => consumption.left_percentage().map(SensorValue::Percent),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
