// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the provider API.
//!
//! - [`PlanApi`]: the three calls a refresh needs
//! - [`ApiClient`]: the HTTP implementation of [`PlanApi`]
//! - [`ClientConfig`]: base URL, identification headers, credentials, timeout
//!
//! # Wire protocol
//!
//! | Call | Request | Success |
//! |------|---------|---------|
//! | login | `POST /user-api/login`, Basic auth | 200 + `x-auth-token` header |
//! | devices | `GET /user-api/devices` | 200 + JSON array of devices |
//! | consumption | `GET /user-api/devices/{id}/consumption` | 200 + JSON array |

pub mod endpoint;

mod credentials;
mod http;

pub use credentials::{AuthToken, Credentials};
pub use http::{ApiClient, ClientConfig};

use std::future::Future;

use crate::error::ApiError;
use crate::types::{ConsumptionOfDevice, Device};

/// The provider calls performed by one refresh cycle.
///
/// Implemented by [`ApiClient`] for the real provider. The refresh
/// coordinator is generic over this trait, so any other implementation
/// (a recorded fixture, a test double) can drive it.
///
/// The returned futures are `Send`, so a coordinator can be polled from a
/// spawned task.
pub trait PlanApi: Send + Sync {
    /// Returns the provider the account belongs to (the `x-provider` value).
    fn provider(&self) -> &str;

    /// Logs in and returns a fresh session token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthenticationFailed`] or
    /// [`ApiError::MissingToken`] if the credentials are rejected, or a
    /// transport error if the provider cannot be reached.
    fn authenticate(&self) -> impl Future<Output = Result<AuthToken, ApiError>> + Send;

    /// Returns the first device of the account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResult`] if the account has no device, or
    /// any transport, status or parse error.
    fn fetch_first_device(
        &self,
        token: &AuthToken,
    ) -> impl Future<Output = Result<Device, ApiError>> + Send;

    /// Returns the latest consumption entry of a device.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResult`] if the history is empty, or any
    /// transport, status or parse error.
    fn fetch_consumption(
        &self,
        token: &AuthToken,
        device_id: &str,
    ) -> impl Future<Output = Result<ConsumptionOfDevice, ApiError>> + Send;
}
