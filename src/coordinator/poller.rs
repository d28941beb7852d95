// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-interval polling of a refresh coordinator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::coordinator::RefreshCoordinator;
use crate::error::RefreshError;
use crate::protocol::PlanApi;

/// Shortest interval the poller accepts.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Why a poller stopped.
#[derive(Debug, Clone)]
pub enum PollerExit {
    /// [`PollerHandle::stop`] was called or the handle was dropped.
    Stopped,
    /// The credentials were rejected. Polling stays stopped until new
    /// credentials are configured.
    AuthFailed(RefreshError),
    /// The polling task panicked or was cancelled by the runtime.
    Aborted,
}

/// Spawns the task that refreshes a coordinator on its update interval.
///
/// The first refresh runs immediately, unless the coordinator already holds
/// data (for example after [`CoordinatorBuilder::build`](crate::CoordinatorBuilder::build)), in which case it
/// runs one interval later. Afterwards one refresh runs every
/// [`update_interval`](RefreshCoordinator::update_interval); a tick missed
/// because a refresh took long is delayed rather than bursted.
///
/// Transient failures are logged and polling continues: the next tick is
/// the retry. An auth failure ends the task.
///
/// # Examples
///
/// ```no_run
/// use onthemove_lib::{Poller, PollerExit, RefreshCoordinator};
///
/// # async fn example() -> onthemove_lib::Result<()> {
/// let coordinator = RefreshCoordinator::builder("bob", "secret").build_without_refresh()?;
/// let poller = Poller::spawn(coordinator.clone());
///
/// if let PollerExit::AuthFailed(err) = poller.join().await {
///     eprintln!("polling stopped: {err}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Poller;

impl Poller {
    /// Starts polling `coordinator` on the current tokio runtime.
    ///
    /// Dropping the returned handle stops the poller.
    #[must_use]
    pub fn spawn<A>(coordinator: Arc<RefreshCoordinator<A>>) -> PollerHandle
    where
        A: PlanApi + 'static,
    {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(poll_loop(coordinator, shutdown_rx));
        PollerHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<PollerExit>,
}

impl PollerHandle {
    /// Asks the poller to stop and waits for it.
    ///
    /// A refresh already in flight is allowed to finish.
    pub async fn stop(mut self) -> PollerExit {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have exited on an auth failure.
            let _ = shutdown.send(());
        }
        self.join().await
    }

    /// Waits for the poller to exit on its own.
    pub async fn join(mut self) -> PollerExit {
        let exit = (&mut self.task).await.unwrap_or(PollerExit::Aborted);
        drop(self.shutdown.take());
        exit
    }

    /// Returns `true` if the polling task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

async fn poll_loop<A: PlanApi>(
    coordinator: Arc<RefreshCoordinator<A>>,
    mut shutdown: oneshot::Receiver<()>,
) -> PollerExit {
    let period = coordinator.update_interval().max(MIN_INTERVAL);
    // Data from a first load done during setup counts as the first tick.
    let start = if coordinator.current().is_some() {
        Instant::now() + period
    } else {
        Instant::now()
    };
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        coordinator = %coordinator.name(),
        interval_secs = period.as_secs(),
        "Polling started"
    );

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(coordinator = %coordinator.name(), "Polling stopped");
                return PollerExit::Stopped;
            }
            _ = ticker.tick() => {}
        }

        match coordinator.refresh().await {
            Ok(_) => {}
            Err(err) if err.is_auth_failure() => {
                tracing::error!(
                    coordinator = %coordinator.name(),
                    error = %err,
                    "Polling stopped, credentials must be re-entered"
                );
                return PollerExit::AuthFailed(err);
            }
            Err(err) => {
                tracing::warn!(
                    coordinator = %coordinator.name(),
                    error = %err,
                    retry_in_secs = period.as_secs(),
                    "Refresh failed, retrying on next tick"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::fake::ScriptedApi;
    use crate::error::ApiError;

    fn coordinator(api: ScriptedApi) -> Arc<RefreshCoordinator<ScriptedApi>> {
        Arc::new(RefreshCoordinator::new(api).with_update_interval(Duration::from_secs(60)))
    }

    #[tokio::test(start_paused = true)]
    async fn first_refresh_is_immediate() {
        let coordinator = coordinator(ScriptedApi::new());
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(coordinator.refresh_count(), 1);
        assert!(coordinator.current().is_some());
        assert!(matches!(poller.stop().await, PollerExit::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn loaded_coordinator_waits_one_interval() {
        let coordinator = coordinator(ScriptedApi::new());
        coordinator.refresh().await.unwrap();
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(coordinator.api().login_calls(), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(coordinator.api().login_calls(), 2);

        assert!(matches!(poller.stop().await, PollerExit::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_first_load_is_retried_immediately() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::Timeout(10_000)));
        let coordinator = coordinator(api);
        assert!(coordinator.refresh().await.is_err());
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(coordinator.api().login_calls(), 2);
        assert!(coordinator.current().is_some());

        assert!(matches!(poller.stop().await, PollerExit::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_on_each_interval() {
        let coordinator = coordinator(ScriptedApi::new());
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_secs(150)).await;

        // Ticks at 0s, 60s and 120s.
        assert_eq!(coordinator.refresh_count(), 3);
        assert_eq!(coordinator.api().login_calls(), 3);
        assert!(matches!(poller.stop().await, PollerExit::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_keeps_polling() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::Timeout(10_000)));
        let coordinator = coordinator(api);
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(coordinator.current().is_none());
        assert!(coordinator.last_error().unwrap().is_retryable());
        assert!(!poller.is_finished());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(coordinator.current().is_some());
        assert!(coordinator.last_error().is_none());

        assert!(matches!(poller.stop().await, PollerExit::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn auth_failure_stops_polling() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::AuthenticationFailed { status: 401 }));
        let coordinator = coordinator(api);
        let poller = Poller::spawn(coordinator.clone());

        let exit = poller.join().await;

        assert!(matches!(exit, PollerExit::AuthFailed(ref err) if err.is_auth_failure()));
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(coordinator.api().login_calls(), 1);
        assert_eq!(coordinator.api().device_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_after_auth_failure_reports_auth_failure() {
        let api = ScriptedApi::new();
        api.push_login(Err(ApiError::MissingToken));
        let coordinator = coordinator(api);
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(poller.is_finished());
        assert!(matches!(poller.stop().await, PollerExit::AuthFailed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_polling() {
        let coordinator = coordinator(ScriptedApi::new());
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(poller);
        tokio::time::sleep(Duration::from_secs(600)).await;

        assert_eq!(coordinator.refresh_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_clamped() {
        let coordinator = Arc::new(
            RefreshCoordinator::new(ScriptedApi::new()).with_update_interval(Duration::ZERO),
        );
        let poller = Poller::spawn(coordinator.clone());

        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Ticks at 0s, 1s and 2s.
        assert_eq!(coordinator.refresh_count(), 3);
        assert!(matches!(poller.stop().await, PollerExit::Stopped));
    }
}
