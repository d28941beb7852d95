// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the provider API.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::protocol::endpoint;
use crate::protocol::{AuthToken, Credentials, PlanApi};
use crate::response::{ConsumptionResponse, DeviceResponse, first_element};
use crate::types::{ConsumptionOfDevice, Device};

const APPLICATION_JSON: &str = "application/json";

// ============================================================================
// ClientConfig
// ============================================================================

/// Configuration for an [`ApiClient`].
///
/// Everything but the credentials has a default matching the production
/// provider.
///
/// # Examples
///
/// ```
/// use onthemove_lib::protocol::{ClientConfig, Credentials};
/// use std::time::Duration;
///
/// let config = ClientConfig::new(Credentials::new("bob", "secret"))
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), ClientConfig::DEFAULT_BASE_URL);
/// assert_eq!(config.provider(), "RENAULT");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    credentials: Credentials,
    application: String,
    provider: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Production base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://internetonthemove.orange-business.com";
    /// Default `x-application` header value.
    pub const DEFAULT_APPLICATION: &'static str = "CLIENT_PORTAL";
    /// Default `x-provider` header value.
    pub const DEFAULT_PROVIDER: &'static str = "RENAULT";
    /// Default per-call timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given account.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            credentials,
            application: Self::DEFAULT_APPLICATION.to_string(),
            provider: Self::DEFAULT_PROVIDER.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the base URL (scheme and host, optionally a port).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the `x-application` header value.
    #[must_use]
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    /// Overrides the `x-provider` header value.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Sets the timeout applied to each call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the `x-application` header value.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Returns the `x-provider` header value.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an [`ApiClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidAddress`] if the base URL is not an
    /// `http`/`https` URL, or [`ApiError::Http`] if the HTTP client cannot
    /// be created.
    pub fn into_client(self) -> Result<ApiClient, ApiError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidAddress(format!("{}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidAddress(format!(
                "{}: unsupported scheme {}",
                self.base_url,
                url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(ApiClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            client,
            credentials: self.credentials,
            application: self.application,
            provider: self.provider,
            timeout: self.timeout,
            token: RwLock::new(None),
        })
    }
}

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client for the provider's login, devices and consumption endpoints.
///
/// Each call is a single attempt bounded by the configured timeout. The
/// token returned by the last successful login is kept and can be read back
/// with [`token`](Self::token).
///
/// # Examples
///
/// ```no_run
/// use onthemove_lib::protocol::{ClientConfig, Credentials, PlanApi};
///
/// # async fn example() -> Result<(), onthemove_lib::ApiError> {
/// let client = ClientConfig::new(Credentials::new("bob", "secret")).into_client()?;
///
/// let token = client.authenticate().await?;
/// let device = client.fetch_first_device(&token).await?;
/// let consumption = client.fetch_consumption(&token, &device.id).await?;
/// println!("{} KB left", consumption.left_data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    credentials: Credentials,
    application: String,
    provider: String,
    timeout: Duration,
    token: RwLock<Option<AuthToken>>,
}

impl ApiClient {
    /// Creates a client for the production provider with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        ClientConfig::new(credentials).into_client()
    }

    /// Returns the base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the `x-provider` header value.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the token stored by the last successful login, if any.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().clone()
    }

    /// Logs in once to check that the credentials are accepted.
    ///
    /// Use [`ApiError::is_auth_failure`] on the error to tell rejected
    /// credentials apart from an unreachable provider.
    ///
    /// # Errors
    ///
    /// Returns the login error unchanged.
    pub async fn check_credentials(&self) -> Result<(), ApiError> {
        self.authenticate().await.map(|_| ())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        ApiError::from_transport(err, self.timeout_ms())
    }

    /// Adds the identification and JSON headers sent on every call.
    fn identify(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(endpoint::HEADER_APPLICATION, &self.application)
            .header(endpoint::HEADER_PROVIDER, &self.provider)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
    }

    /// GETs a list endpoint and returns its first element.
    async fn get_first<T: DeserializeOwned>(
        &self,
        token: &AuthToken,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);

        tracing::debug!(url = %url, "Sending API request");

        let response = self
            .identify(self.client.get(&url))
            .header(endpoint::HEADER_AUTH_TOKEN, token.as_str())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(endpoint = path, status = status.as_u16(), "Unexpected API status");
            return Err(ApiError::UnexpectedStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        tracing::debug!(endpoint = path, bytes = body.len(), "Received API response");

        first_element(&body, path)
    }
}

impl PlanApi for ApiClient {
    fn provider(&self) -> &str {
        &self.provider
    }

    async fn authenticate(&self) -> Result<AuthToken, ApiError> {
        let url = self.url(endpoint::LOGIN);

        tracing::debug!(url = %url, username = self.credentials.username(), "Logging in");

        let response = self
            .identify(self.client.post(&url))
            .basic_auth(
                self.credentials.username(),
                Some(self.credentials.password()),
            )
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "Login rejected");
            return Err(ApiError::AuthenticationFailed {
                status: status.as_u16(),
            });
        }

        let token = response
            .headers()
            .get(endpoint::HEADER_AUTH_TOKEN)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(AuthToken::new)
            .ok_or(ApiError::MissingToken)?;

        *self.token.write() = Some(token.clone());

        tracing::debug!("Fetched auth token");

        Ok(token)
    }

    async fn fetch_first_device(&self, token: &AuthToken) -> Result<Device, ApiError> {
        let device: DeviceResponse = self.get_first(token, endpoint::DEVICES).await?;
        Ok(device.into_device())
    }

    async fn fetch_consumption(
        &self,
        token: &AuthToken,
        device_id: &str,
    ) -> Result<ConsumptionOfDevice, ApiError> {
        let path = endpoint::consumption(device_id);
        let consumption: ConsumptionResponse = self.get_first(token, &path).await?;
        Ok(consumption.into_consumption())
    }
}
