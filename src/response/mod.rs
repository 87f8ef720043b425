// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing of JMRI list payloads.
//!
//! JMRI and the proxies in front of it return device lists in several
//! shapes: a bare array, an object holding the array under `data` or
//! `items`, or an object keyed by device name. Each element may itself be
//! wrapped as `{"type": ..., "data": {...}}`. Everything is normalised here,
//! so the rest of the crate only sees [`DeviceRecord`](crate::state::DeviceRecord)s.
//!
//! # Examples
//!
//! ```
//! use jmri_panel::response::unwrap_records;
//! use jmri_panel::types::{DeviceKind, LogicalState};
//!
//! let payload = serde_json::json!([
//!     {"type": "turnout", "data": {"name": "IT1", "userName": "East", "state": 4}}
//! ]);
//! let records = unwrap_records(DeviceKind::Turnout, &payload).unwrap();
//! assert_eq!(records[0].identifier(), "IT1");
//! assert_eq!(records[0].logical_state(), LogicalState::Secondary);
//! ```

mod connection;
mod payload;

pub use connection::{ConnectionSettings, SystemConnection};
pub use payload::unwrap_records;
