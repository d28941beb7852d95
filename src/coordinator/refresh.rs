// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The authenticate-then-fetch refresh cycle.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::error::{ApiError, RefreshError};
use crate::protocol::PlanApi;
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::FullData;

type Outcome = Result<Arc<FullData>, RefreshError>;

/// Runs refresh cycles against a [`PlanApi`] and caches the last snapshot.
///
/// A refresh logs in, fetches the first device, then fetches that device's
/// consumption. On success the cached [`FullData`] is replaced in one step;
/// on failure it is left untouched and the error is classified as
/// [`RefreshError::Auth`] (login rejected) or [`RefreshError::Transient`]
/// (anything else).
///
/// Only one cycle runs at a time. A caller arriving while a cycle is in
/// flight waits for it and receives its outcome instead of issuing a second
/// set of requests.
///
/// The coordinator is meant to be shared as `Arc<RefreshCoordinator<A>>`
/// between the poller and the sensors reading [`current`](Self::current).
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use onthemove_lib::RefreshCoordinator;
/// use onthemove_lib::protocol::{ApiClient, Credentials};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(Credentials::new("bob", "secret"))?;
/// let coordinator = Arc::new(RefreshCoordinator::new(client));
///
/// match coordinator.refresh().await {
///     Ok(data) => println!("{} KB left", data.consumption.left_data),
///     Err(err) if err.is_auth_failure() => eprintln!("check credentials: {err}"),
///     Err(err) => eprintln!("will retry later: {err}"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct RefreshCoordinator<A> {
    name: String,
    api: A,
    update_interval: Duration,
    call_timeout: Option<Duration>,
    data: RwLock<Option<Arc<FullData>>>,
    last_outcome: RwLock<Option<Outcome>>,
    completed: AtomicU64,
    in_flight: Mutex<()>,
    callbacks: CallbackRegistry,
}

impl<A: PlanApi> RefreshCoordinator<A> {
    /// Default interval between two scheduled refreshes.
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(3600);

    /// Default name, used in logs.
    pub const DEFAULT_NAME: &'static str = "Orange Internet on the move sensor";

    /// Creates a coordinator with no cached data.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            api,
            update_interval: Self::DEFAULT_UPDATE_INTERVAL,
            call_timeout: None,
            data: RwLock::new(None),
            last_outcome: RwLock::new(None),
            completed: AtomicU64::new(0),
            in_flight: Mutex::new(()),
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Sets the name used in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the interval the poller uses between refreshes.
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Bounds each API call of a cycle, independently of the API's own
    /// timeout. An expired call fails the cycle with a transient
    /// [`ApiError::Timeout`].
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Returns the name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the interval between scheduled refreshes.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Returns the underlying API.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the last successfully fetched snapshot, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<FullData>> {
        self.data.read().clone()
    }

    /// Returns the error of the last cycle, or `None` if it succeeded or no
    /// cycle ran yet.
    #[must_use]
    pub fn last_error(&self) -> Option<RefreshError> {
        match &*self.last_outcome.read() {
            Some(Err(err)) => Some(err.clone()),
            _ => None,
        }
    }

    /// Returns the number of completed cycles, successful or not.
    #[must_use]
    pub fn refresh_count(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Returns `true` while a cycle is in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Runs a refresh cycle, or joins the one already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::Auth`] if the login was rejected, and
    /// [`RefreshError::Transient`] for every other failure. The cached
    /// snapshot is unchanged on error.
    pub async fn refresh(&self) -> Result<Arc<FullData>, RefreshError> {
        let seen = self.completed.load(Ordering::Acquire);
        let _guard = self.in_flight.lock().await;

        // A cycle completed while we were waiting for the lock: share it.
        if self.completed.load(Ordering::Acquire) != seen {
            let last = self.last_outcome.read().clone();
            if let Some(outcome) = last {
                tracing::debug!(coordinator = %self.name, "Joined in-flight refresh");
                return outcome;
            }
        }

        tracing::debug!(coordinator = %self.name, "Starting refresh");

        let outcome = self.run_cycle().await;

        match &outcome {
            Ok(data) => {
                *self.data.write() = Some(Arc::clone(data));
                tracing::info!(
                    coordinator = %self.name,
                    device_id = %data.device.id,
                    left_data = data.consumption.left_data,
                    initial_data = data.consumption.initial_data,
                    "Refresh succeeded"
                );
            }
            Err(err) if err.is_auth_failure() => {
                tracing::error!(coordinator = %self.name, error = %err, "Refresh failed, credentials rejected");
            }
            Err(err) => {
                tracing::warn!(coordinator = %self.name, error = %err, "Refresh failed");
            }
        }

        *self.last_outcome.write() = Some(outcome.clone());
        self.completed.fetch_add(1, Ordering::AcqRel);

        match &outcome {
            Ok(data) => self.callbacks.dispatch_refreshed(data),
            Err(err) => self.callbacks.dispatch_failed(err),
        }

        outcome
    }

    async fn run_cycle(&self) -> Outcome {
        let token = self
            .bounded(self.api.authenticate())
            .await
            .map_err(RefreshError::from_login)?;

        let device = self
            .bounded(self.api.fetch_first_device(&token))
            .await
            .map_err(RefreshError::transient)?;

        tracing::debug!(coordinator = %self.name, device_id = %device.id, "Fetched first device");

        let consumption = self
            .bounded(self.api.fetch_consumption(&token, &device.id))
            .await
            .map_err(RefreshError::transient)?;

        Ok(Arc::new(FullData::new(device, consumption)))
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>> + Send,
    {
        match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(ApiError::Timeout(
                    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                ))
            }),
            None => call.await,
        }
    }
}

impl<A: PlanApi> Subscribable for RefreshCoordinator<A> {
    fn on_refreshed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FullData) + Send + Sync + 'static,
    {
        self.callbacks.on_refreshed(callback)
    }

    fn on_refresh_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RefreshError) + Send + Sync + 'static,
    {
        self.callbacks.on_refresh_failed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl<A: std::fmt::Debug> std::fmt::Debug for RefreshCoordinator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("name", &self.name)
            .field("api", &self.api)
            .field("update_interval", &self.update_interval)
            .field("has_data", &self.data.read().is_some())
            .field("completed", &self.completed.load(Ordering::Relaxed))
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::fake::{ScriptedApi, sample_consumption, sample_data};
    use crate::protocol::AuthToken;
    use std::sync::atomic::AtomicU32;

    #[tokio::test]
    async fn refresh_builds_full_data() {
        let coordinator = RefreshCoordinator::new(ScriptedApi::new());

        let data = coordinator.refresh().await.unwrap();

        assert_eq!(*data, sample_data());
        assert_eq!(coordinator.current().unwrap(), data);
        assert_eq!(coordinator.refresh_count(), 1);
        assert!(coordinator.last_error().is_none());
    }

    #[tokio::test]
    async fn consumption_requested_for_fetched_device() {
        let api = ScriptedApi::new();
        let mut device = crate::coordinator::fake::sample_device();
        device.id = "D42".to_string();
        api.push_device(Ok(device));
        let coordinator = RefreshCoordinator::new(api);

        let data = coordinator.refresh().await.unwrap();

        assert_eq!(data.device.id, "D42");
        assert_eq!(coordinator.api().consumption_ids(), vec!["D42".to_string()]);
    }

    #[tokio::test]
    async fn login_rejection_is_auth_failure_and_stops_cycle() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::AuthenticationFailed { status: 401 }));
        let coordinator = RefreshCoordinator::new(api);

        let err = coordinator.refresh().await.unwrap_err();

        assert!(err.is_auth_failure());
        assert_eq!(coordinator.api().login_calls(), 1);
        assert_eq!(coordinator.api().device_calls(), 0);
        assert_eq!(coordinator.api().consumption_calls(), 0);
        assert!(coordinator.current().is_none());
    }

    #[tokio::test]
    async fn missing_token_is_auth_failure() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::MissingToken));
        let coordinator = RefreshCoordinator::new(api);

        let err = coordinator.refresh().await.unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(coordinator.api().device_calls(), 0);
    }

    #[tokio::test]
    async fn login_timeout_is_transient() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::Timeout(10_000)));
        let coordinator = RefreshCoordinator::new(api);

        let err = coordinator.refresh().await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn empty_device_list_keeps_cached_data() {
        let api = ScriptedApi::new();
        let coordinator = RefreshCoordinator::new(api);
        let first = coordinator.refresh().await.unwrap();

        coordinator.api().push_device(Err(ApiError::EmptyResult {
            endpoint: "/user-api/devices".to_string(),
        }));
        let err = coordinator.refresh().await.unwrap_err();

        assert!(err.is_retryable());
        assert!(err.is_empty_result());
        assert!(Arc::ptr_eq(&coordinator.current().unwrap(), &first));
        assert_eq!(coordinator.api().consumption_calls(), 1);
        assert!(coordinator.last_error().unwrap().is_empty_result());
    }

    #[tokio::test]
    async fn consumption_failure_is_transient() {
        let api = ScriptedApi::new();
        api.push_consumption(Err(ApiError::UnexpectedStatus {
            endpoint: "/user-api/devices/D1/consumption".to_string(),
            status: 500,
        }));
        let coordinator = RefreshCoordinator::new(api);

        let err = coordinator.refresh().await.unwrap_err();
        assert!(err.is_retryable());
        assert!(coordinator.current().is_none());
    }

    #[tokio::test]
    async fn data_endpoint_401_is_transient() {
        let api = ScriptedApi::new();
        api.push_device(Err(ApiError::UnexpectedStatus {
            endpoint: "/user-api/devices".to_string(),
            status: 401,
        }));
        let coordinator = RefreshCoordinator::new(api);

        let err = coordinator.refresh().await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn identical_responses_give_equal_snapshots() {
        let coordinator = RefreshCoordinator::new(ScriptedApi::new());

        let first = coordinator.refresh().await.unwrap();
        let second = coordinator.refresh().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(coordinator.refresh_count(), 2);
        assert_eq!(coordinator.api().login_calls(), 2);
    }

    #[tokio::test]
    async fn success_after_failure_clears_last_error() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::Timeout(1)));
        let coordinator = RefreshCoordinator::new(api);

        assert!(coordinator.refresh().await.is_err());
        assert!(coordinator.last_error().is_some());

        coordinator.refresh().await.unwrap();
        assert!(coordinator.last_error().is_none());
    }

    #[tokio::test]
    async fn new_snapshot_replaces_old_one() {
        let api = ScriptedApi::new();
        let mut lower = sample_consumption();
        lower.left_data = 1024;
        api.push_consumption(Ok(sample_consumption()));
        api.push_consumption(Ok(lower));
        let coordinator = RefreshCoordinator::new(api);

        let first = coordinator.refresh().await.unwrap();
        let second = coordinator.refresh().await.unwrap();

        assert_eq!(first.consumption.left_data, 2_411_724);
        assert_eq!(second.consumption.left_data, 1024);
        assert_eq!(coordinator.current().unwrap().consumption.left_data, 1024);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_refreshes_are_coalesced() {
        let api = ScriptedApi::new().with_login_delay(Duration::from_secs(1));
        let coordinator = RefreshCoordinator::new(api);

        let (a, b, c) = tokio::join!(
            coordinator.refresh(),
            coordinator.refresh(),
            coordinator.refresh()
        );

        let a = a.unwrap();
        assert!(Arc::ptr_eq(&a, &b.unwrap()));
        assert!(Arc::ptr_eq(&a, &c.unwrap()));
        assert_eq!(coordinator.api().login_calls(), 1);
        assert_eq!(coordinator.api().consumption_calls(), 1);
        assert_eq!(coordinator.refresh_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn coalesced_callers_share_failure() {
        let api = ScriptedApi::new().with_login_delay(Duration::from_secs(1));
        api.push_login(Err(ApiError::AuthenticationFailed { status: 403 }));
        let coordinator = RefreshCoordinator::new(api);

        let (a, b) = tokio::join!(coordinator.refresh(), coordinator.refresh());

        assert!(a.unwrap_err().is_auth_failure());
        assert!(b.unwrap_err().is_auth_failure());
        assert_eq!(coordinator.api().login_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn call_timeout_is_transient() {
        let api = ScriptedApi::new().with_login_delay(Duration::from_secs(30));
        let coordinator =
            RefreshCoordinator::new(api).with_call_timeout(Duration::from_secs(5));

        let err = coordinator.refresh().await.unwrap_err();

        assert!(err.is_retryable());
        assert!(matches!(err.api_error(), ApiError::Timeout(5_000)));
        assert_eq!(coordinator.api().device_calls(), 0);
    }

    #[tokio::test]
    async fn is_refreshing_false_when_idle() {
        let coordinator = RefreshCoordinator::new(ScriptedApi::new());
        assert!(!coordinator.is_refreshing());
        coordinator.refresh().await.unwrap();
        assert!(!coordinator.is_refreshing());
    }

    #[tokio::test]
    async fn observers_are_notified() {
        let api = ScriptedApi::new();
        api.push_login(Ok(AuthToken::new("T1")));
        api.push_login(Err(ApiError::MissingToken));
        let coordinator = RefreshCoordinator::new(api);

        let refreshed = Arc::new(AtomicU32::new(0));
        let failed = Arc::new(AtomicU32::new(0));

        let refreshed_clone = refreshed.clone();
        coordinator.on_refreshed(move |data| {
            assert_eq!(data.device.id, "D1");
            refreshed_clone.fetch_add(1, Ordering::SeqCst);
        });
        let failed_clone = failed.clone();
        coordinator.on_refresh_failed(move |err| {
            assert!(err.is_auth_failure());
            failed_clone.fetch_add(1, Ordering::SeqCst);
        });

        coordinator.refresh().await.unwrap();
        coordinator.refresh().await.unwrap_err();

        assert_eq!(refreshed.load(Ordering::SeqCst), 1);
        assert_eq!(failed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unsubscribed_observer_is_not_called() {
        let coordinator = RefreshCoordinator::new(ScriptedApi::new());
        let counter = Arc::new(AtomicU32::new(0));

        let counter_clone = counter.clone();
        let id = coordinator.on_refreshed(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert!(coordinator.unsubscribe(id));

        coordinator.refresh().await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn defaults() {
        let coordinator = RefreshCoordinator::new(ScriptedApi::new());
        assert_eq!(coordinator.update_interval(), Duration::from_secs(3600));
        assert_eq!(coordinator.name(), "Orange Internet on the move sensor");
        assert!(coordinator.current().is_none());
        assert_eq!(coordinator.refresh_count(), 0);
    }

    #[test]
    fn builder_methods() {
        let coordinator = RefreshCoordinator::new(ScriptedApi::new())
            .with_name("car")
            .with_update_interval(Duration::from_secs(60));
        assert_eq!(coordinator.name(), "car");
        assert_eq!(coordinator.update_interval(), Duration::from_secs(60));
    }
}
