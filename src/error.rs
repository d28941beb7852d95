// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `onthemove` library.
//!
//! Errors are layered the same way the library is:
//!
//! - [`ApiError`] is returned by the HTTP client for a single call.
//! - [`RefreshError`] is returned by the refresh coordinator and tells the
//!   caller whether the failure needs new credentials or just a later retry.
//! - [`Error`] wraps both for callers that do not care about the layer.

use std::sync::Arc;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A single API call failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// A refresh cycle failed.
    #[error("refresh error: {0}")]
    Refresh(#[from] RefreshError),

    /// The supplied configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors returned by a single call to the provider API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, TLS, body read...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The call did not complete within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The login endpoint rejected the credentials.
    #[error("authentication failed with HTTP {status}")]
    AuthenticationFailed {
        /// HTTP status returned by the login endpoint.
        status: u16,
    },

    /// The login endpoint answered 200 without a usable `x-auth-token` header.
    #[error("login response did not carry an x-auth-token header")]
    MissingToken,

    /// A data endpoint answered with a non-200 status.
    #[error("{endpoint} returned HTTP {status}")]
    UnexpectedStatus {
        /// Path of the endpoint that was called.
        endpoint: String,
        /// HTTP status that was returned.
        status: u16,
    },

    /// A list endpoint returned zero elements where one was required.
    #[error("{endpoint} returned an empty list")]
    EmptyResult {
        /// Path of the endpoint that was called.
        endpoint: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The configured base URL or a derived URL is not usable.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl ApiError {
    /// Returns `true` if the provider rejected the credentials.
    ///
    /// Only login failures are auth failures: a transport error during login
    /// or a 401 on a data endpoint is not.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. } | Self::MissingToken)
    }

    /// Returns `true` if a list endpoint returned no element.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }

    /// Maps a reqwest error, separating timeouts from other transport errors.
    pub(crate) fn from_transport(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else {
            Self::Http(err)
        }
    }
}

/// Errors related to parsing provider responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classified outcome of a failed refresh cycle.
///
/// The error is cheap to clone so that callers coalesced onto the same
/// in-flight refresh all receive it.
#[derive(Debug, Error, Clone)]
pub enum RefreshError {
    /// The credentials were rejected. Automatic retries should stop until
    /// the user supplies new credentials.
    #[error("authentication failed: {0}")]
    Auth(#[source] Arc<ApiError>),

    /// Any other failure. The next scheduled refresh may succeed.
    #[error("error communicating with API: {0}")]
    Transient(#[source] Arc<ApiError>),
}

impl RefreshError {
    /// Classifies a failure of the login step.
    #[must_use]
    pub fn from_login(err: ApiError) -> Self {
        if err.is_auth_failure() {
            Self::Auth(Arc::new(err))
        } else {
            Self::Transient(Arc::new(err))
        }
    }

    /// Classifies a failure of a data step. Always transient.
    #[must_use]
    pub fn transient(err: ApiError) -> Self {
        Self::Transient(Arc::new(err))
    }

    /// Returns `true` if a later refresh may succeed without user action.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Returns `true` if the credentials were rejected.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Returns `true` if the failure was an empty list response.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.api_error().is_empty_result()
    }

    /// Returns the underlying API error.
    #[must_use]
    pub fn api_error(&self) -> &ApiError {
        match self {
            Self::Auth(err) | Self::Transient(err) => err,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
