// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for the provider's JSON bodies.
//!
//! Both data endpoints return a JSON array, of which only the first element
//! is used. [`first_element`] turns an empty array into an explicit
//! [`ApiError::EmptyResult`].

mod consumption;
mod device;

pub use consumption::ConsumptionResponse;
pub use device::{DeviceResponse, DeviceUser};

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ParseError};

/// Parses `body` as a JSON array and returns its first element.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] if the body is not an array of `T`, or
/// [`ApiError::EmptyResult`] if the array is empty.
pub fn first_element<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, ApiError> {
    let items: Vec<T> = serde_json::from_str(body).map_err(ParseError::Json)?;
    items.into_iter().next().ok_or_else(|| ApiError::EmptyResult {
        endpoint: endpoint.to_string(),
    })
}
