// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state codec and device records.
//!
//! The codec converts between the raw integer JMRI reports for a turnout or
//! light and the [`LogicalState`](crate::types::LogicalState) shown to an
//! operator. A [`DeviceRecord`] never stores its logical state; it derives it
//! from `(raw_state, inverted)` each time it is asked.
//!
//! # Examples
//!
//! ```
//! use jmri_panel::state::{logical_to_raw, raw_to_logical};
//! use jmri_panel::types::{LogicalState, TargetState};
//!
//! assert_eq!(raw_to_logical(Some(4), false), LogicalState::Secondary);
//! assert_eq!(raw_to_logical(Some(4), true), LogicalState::Primary);
//! assert_eq!(logical_to_raw(TargetState::Primary, true), 4);
//! ```

mod codec;
mod device_record;

pub use codec::{RAW_PRIMARY, RAW_SECONDARY, logical_to_raw, raw_to_logical};
pub use device_record::{DeviceFields, DeviceRecord};
