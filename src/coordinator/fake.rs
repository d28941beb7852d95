// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted [`PlanApi`] used by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::ApiError;
use crate::protocol::{AuthToken, PlanApi};
use crate::types::{ConsumptionOfDevice, Device, FullData};

pub(crate) fn sample_device() -> Device {
    Device {
        id: "D1".to_string(),
        country: "FR".to_string(),
        status: "OK".to_string(),
        tag: "t".to_string(),
        user_id: "u1".to_string(),
        user_name: "Bob".to_string(),
        creation_date: "2024-01-01".to_string(),
        serial_number: "S1".to_string(),
    }
}

pub(crate) fn sample_consumption() -> ConsumptionOfDevice {
    ConsumptionOfDevice {
        plan_type: "Flex".to_string(),
        initial_data: 3_145_728,
        left_data: 2_411_724,
        expiry_date: "2024-06-01".to_string(),
        start_date: "2024-01-01".to_string(),
    }
}

pub(crate) fn sample_data() -> FullData {
    FullData::new(sample_device(), sample_consumption())
}

/// Answers from queued results, falling back to the sample data once a
/// queue is empty.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    logins: Mutex<VecDeque<Result<AuthToken, ApiError>>>,
    devices: Mutex<VecDeque<Result<Device, ApiError>>>,
    consumptions: Mutex<VecDeque<Result<ConsumptionOfDevice, ApiError>>>,
    consumption_ids: Mutex<Vec<String>>,
    login_delay: Option<Duration>,
    login_calls: AtomicU32,
    device_calls: AtomicU32,
    consumption_calls: AtomicU32,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = Some(delay);
        self
    }

    pub(crate) fn push_login(&self, result: Result<AuthToken, ApiError>) {
        self.logins.lock().push_back(result);
    }

    pub(crate) fn push_device(&self, result: Result<Device, ApiError>) {
        self.devices.lock().push_back(result);
    }

    pub(crate) fn push_consumption(&self, result: Result<ConsumptionOfDevice, ApiError>) {
        self.consumptions.lock().push_back(result);
    }

    pub(crate) fn login_calls(&self) -> u32 {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn device_calls(&self) -> u32 {
        self.device_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn consumption_calls(&self) -> u32 {
        self.consumption_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn consumption_ids(&self) -> Vec<String> {
        self.consumption_ids.lock().clone()
    }
}

impl PlanApi for ScriptedApi {
    fn provider(&self) -> &str {
        "RENAULT"
    }

    async fn authenticate(&self) -> Result<AuthToken, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.login_delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.logins.lock().pop_front();
        next.unwrap_or_else(|| Ok(AuthToken::new("T1")))
    }

    async fn fetch_first_device(&self, _token: &AuthToken) -> Result<Device, ApiError> {
        self.device_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.devices.lock().pop_front();
        next.unwrap_or_else(|| Ok(sample_device()))
    }

    async fn fetch_consumption(
        &self,
        _token: &AuthToken,
        device_id: &str,
    ) -> Result<ConsumptionOfDevice, ApiError> {
        self.consumption_calls.fetch_add(1, Ordering::SeqCst);
        self.consumption_ids.lock().push(device_id.to_string());
        let next = self.consumptions.lock().pop_front();
        next.unwrap_or_else(|| Ok(sample_consumption()))
    }
}
