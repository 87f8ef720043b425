// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Progress events for batch provisioning.
//!
//! A [`BatchProvisioner`](crate::batch::BatchProvisioner) attached to an
//! [`EventBus`] publishes one [`ProvisionEvent`] when a batch starts, one per
//! device, and one when it finishes, so an operator can watch addresses being
//! created in order.
//!
//! # Examples
//!
//! ```
//! use jmri_panel::event::{BatchId, EventBus, ProvisionEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ProvisionEvent::Finished {
//!     batch_id: BatchId::new(),
//!     succeeded: 3,
//!     failed: 0,
//! });
//! ```

mod batch_id;
mod event_bus;
mod provision_event;

pub use batch_id::BatchId;
pub use event_bus::EventBus;
pub use provision_event::ProvisionEvent;
