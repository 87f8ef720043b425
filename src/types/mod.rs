// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the panel core.
//!
//! # Types
//!
//! - [`DeviceKind`] - Turnout, light or locomotive (roster entry)
//! - [`LogicalState`] - Human-facing tri-state derived from a raw JMRI code
//! - [`TargetState`] - A state that can be sent to the server

mod kind;
mod state;

pub use kind::DeviceKind;
pub use state::{LogicalState, TargetState};
