// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `OnTheMove` Lib - A Rust library to poll an Orange "Internet on the move"
//! data plan.
//!
//! The library logs in to the provider API, reads the first device of the
//! account and that device's latest consumption, and exposes the result as
//! a cached snapshot plus six ready-made sensors.
//!
//! # Features
//!
//! - **HTTP client**: login, device list and consumption calls
//! - **Refresh coordination**: one cycle in flight, concurrent callers
//!   share its outcome, failures classified as auth or transient
//! - **Polling**: fixed-interval refresh task that stops on rejected
//!   credentials
//! - **Sensors**: plan type, dates, quota, remaining data and percentage
//! - **Callbacks**: observers notified after every refresh
//!
//! # Quick Start
//!
//! ```no_run
//! use onthemove_lib::{Poller, PollerExit, RefreshCoordinator};
//! use onthemove_lib::sensor::sensors;
//!
//! #[tokio::main]
//! async fn main() -> onthemove_lib::Result<()> {
//!     // Runs the first refresh; setup fails if the account cannot be read
//!     let (coordinator, data) = RefreshCoordinator::builder("bob", "secret")
//!         .build()
//!         .await?;
//!     println!("{} KB left on {}", data.consumption.left_data, data.device.tag);
//!
//!     for sensor in sensors(&coordinator) {
//!         println!("{}: {:?}", sensor.name(), sensor.state());
//!     }
//!
//!     // Refresh every hour until the credentials are rejected
//!     let poller = Poller::spawn(coordinator.clone());
//!     if let PollerExit::AuthFailed(err) = poller.join().await {
//!         eprintln!("re-enter credentials: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Checking Credentials
//!
//! ```no_run
//! use onthemove_lib::protocol::{ApiClient, Credentials};
//!
//! # async fn example() -> onthemove_lib::Result<()> {
//! let client = ApiClient::new(Credentials::new("bob", "secret"))?;
//! match client.check_credentials().await {
//!     Ok(()) => println!("credentials accepted"),
//!     Err(err) if err.is_auth_failure() => println!("invalid credentials"),
//!     Err(err) => println!("cannot connect: {err}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod error;
pub mod protocol;
pub mod response;
pub mod sensor;
pub mod subscription;
pub mod types;

pub use coordinator::{CoordinatorBuilder, Poller, PollerExit, PollerHandle, RefreshCoordinator};
pub use error::{ApiError, Error, ParseError, RefreshError, Result};
pub use protocol::{ApiClient, AuthToken, ClientConfig, Credentials, PlanApi};
pub use sensor::{DeviceInfo, PlanSensor, SensorKind, SensorValue};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{ConsumptionOfDevice, Device, FullData, PlanDate, PlanDateParseError};
