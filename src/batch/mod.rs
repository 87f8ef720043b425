// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sequential batch creation of devices.
//!
//! A [`BatchProvisioner`] creates up to [`MAX_BATCH_SIZE`] devices with
//! consecutive numeric addresses through a [`DeviceRegistry`]. Devices are
//! created strictly one after the other, in increasing address order. A
//! failure for one address is recorded in the [`BatchResult`] and the batch
//! moves on to the next address.
//!
//! Only validation errors abort a batch, and they are raised before the
//! registry is called at all.
//!
//! # Examples
//!
//! ```no_run
//! use jmri_panel::batch::{BatchProvisioner, BatchRequest, ProvisioningContext};
//! use jmri_panel::protocol::JmriConfig;
//! use jmri_panel::types::{DeviceKind, TargetState};
//!
//! # async fn example() -> jmri_panel::Result<()> {
//! let client = JmriConfig::new("192.168.1.20").into_client()?;
//! let context = client.load_context(DeviceKind::Turnout).await?;
//!
//! let request = BatchRequest::new(DeviceKind::Turnout, "IT", 100)
//!     .with_count(8)
//!     .with_display_name("Yard")
//!     .with_state(TargetState::Primary);
//!
//! let result = BatchProvisioner::new(client).provision(&request, &context).await?;
//! for failure in &result.failures {
//!     eprintln!("{}: {}", failure.address, failure.message);
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod provisioner;
mod registry;
mod request;
mod result;

pub use context::ProvisioningContext;
pub use provisioner::BatchProvisioner;
pub use registry::DeviceRegistry;
pub use request::{BatchRequest, MAX_BATCH_SIZE, parse_base_address};
pub use result::{BatchFailure, BatchResult, FailureStage};
