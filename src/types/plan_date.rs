// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan start and expiry dates.
//!
//! The provider sends plan dates as strings. The accepted formats are:
//!
//! - ISO 8601 with timezone: `"2024-06-01T00:00:00+02:00"`
//! - ISO 8601 without timezone: `"2024-06-01T00:00:00"` (read as UTC)
//! - Plain date: `"2024-06-01"` (midnight UTC)
//!
//! # Examples
//!
//! ```
//! use onthemove_lib::types::PlanDate;
//!
//! let date: PlanDate = "2024-06-01".parse().unwrap();
//! assert_eq!(date.to_string(), "2024-06-01 00:00:00 +00:00");
//! ```

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Error returned when a plan date string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDateParseError {
    input: String,
}

impl PlanDateParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// Returns the input string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl std::fmt::Display for PlanDateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to parse plan date: '{}' (expected ISO 8601 date or datetime)",
            self.input
        )
    }
}

impl std::error::Error for PlanDateParseError {}

/// A timezone-aware plan date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanDate(DateTime<FixedOffset>);

impl PlanDate {
    /// Parses a plan date, returning `None` if the format is not recognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    fn parse_with_tz(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s).ok().map(Self)
    }

    fn parse_naive_datetime(s: &str) -> Option<Self> {
        let formats = [
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ];

        formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Self::from)
    }

    fn parse_date(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::from)
    }

    /// Returns the date as a chrono datetime.
    #[must_use]
    pub const fn to_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl FromStr for PlanDate {
    type Err = PlanDateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Self::parse_with_tz(s)
            .or_else(|| Self::parse_naive_datetime(s))
            .or_else(|| Self::parse_date(s))
            .ok_or_else(|| PlanDateParseError::new(s))
    }
}

impl From<NaiveDateTime> for PlanDate {
    fn from(naive: NaiveDateTime) -> Self {
        Self(naive.and_utc().fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for PlanDate {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }
}

impl std::fmt::Display for PlanDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}
