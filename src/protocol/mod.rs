// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP access to a JMRI server.
//!
//! [`JmriClient`] talks to the JMRI JSON servlet (`/json/...`) and implements
//! [`DeviceRegistry`](crate::batch::DeviceRegistry), so it can drive a
//! [`BatchProvisioner`](crate::batch::BatchProvisioner) directly.
//!
//! HTTP is stateless: each operation is an independent request.

mod http;

pub use http::{JmriClient, JmriConfig};
