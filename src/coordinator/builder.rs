// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-call setup of an HTTP-backed coordinator.

use std::sync::Arc;
use std::time::Duration;

use crate::coordinator::RefreshCoordinator;
use crate::error::Error;
use crate::protocol::{ApiClient, ClientConfig, Credentials};
use crate::types::FullData;

/// Builder for a [`RefreshCoordinator`] talking to the provider over HTTP.
///
/// Created with [`RefreshCoordinator::builder`] or
/// [`CoordinatorBuilder::from_config`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use onthemove_lib::RefreshCoordinator;
///
/// # async fn example() -> onthemove_lib::Result<()> {
/// // First load during setup; fails if the account cannot be read
/// let (coordinator, data) = RefreshCoordinator::builder("bob", "secret")
///     .with_update_interval(Duration::from_secs(1800))
///     .build()
///     .await?;
/// println!("{} on plan {}", data.device.tag, data.consumption.plan_type);
///
/// // No network access until the first refresh
/// let coordinator = RefreshCoordinator::builder("bob", "secret")
///     .with_provider("OTHER")
///     .build_without_refresh()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CoordinatorBuilder {
    config: ClientConfig,
    update_interval: Duration,
    name: Option<String>,
}

impl CoordinatorBuilder {
    /// Creates a builder from an existing client configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            update_interval: RefreshCoordinator::<ApiClient>::DEFAULT_UPDATE_INTERVAL,
            name: None,
        }
    }

    /// Sets the provider base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Sets the per-call HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the `x-application` header value.
    #[must_use]
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.config = self.config.with_application(application);
        self
    }

    /// Sets the `x-provider` header value.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.config = self.config.with_provider(provider);
        self
    }

    /// Sets the interval between scheduled refreshes.
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Sets the coordinator name used in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the client configuration built so far.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the coordinator and runs the first refresh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero update interval,
    /// [`Error::Api`] if the client cannot be created, or
    /// [`Error::Refresh`] if the first refresh fails.
    pub async fn build(self) -> Result<(Arc<RefreshCoordinator<ApiClient>>, Arc<FullData>), Error> {
        let coordinator = self.build_without_refresh()?;
        let data = coordinator.refresh().await?;
        Ok((coordinator, data))
    }

    /// Builds the coordinator without contacting the provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero update interval,
    /// or [`Error::Api`] if the client cannot be created.
    pub fn build_without_refresh(self) -> Result<Arc<RefreshCoordinator<ApiClient>>, Error> {
        if self.update_interval.is_zero() {
            return Err(Error::InvalidConfiguration(
                "update interval must be greater than zero".to_string(),
            ));
        }

        let client = self.config.into_client()?;
        let mut coordinator =
            RefreshCoordinator::new(client).with_update_interval(self.update_interval);
        if let Some(name) = self.name {
            coordinator = coordinator.with_name(name);
        }

        tracing::debug!(
            coordinator = %coordinator.name(),
            base_url = %coordinator.api().base_url(),
            provider = %coordinator.api().provider(),
            "Coordinator created"
        );

        Ok(Arc::new(coordinator))
    }
}

impl RefreshCoordinator<ApiClient> {
    /// Starts building an HTTP-backed coordinator for an account.
    #[must_use]
    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> CoordinatorBuilder {
        CoordinatorBuilder::from_config(ClientConfig::new(Credentials::new(username, password)))
    }
}
