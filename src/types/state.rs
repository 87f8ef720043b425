// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical device states.
//!
//! JMRI reports turnout and light state as small integers. The panel shows
//! them as a tri-state: the primary state (Closed / On), the secondary
//! state (Thrown / Off), or Unknown when the code is anything else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::DeviceKind;

/// Human-facing state of a device, derived from its raw code.
///
/// # Examples
///
/// ```
/// use jmri_panel::types::{DeviceKind, LogicalState};
///
/// assert_eq!(LogicalState::Secondary.label(DeviceKind::Turnout), "Thrown");
/// assert_eq!(LogicalState::Primary.label(DeviceKind::Light), "On");
/// assert_eq!(LogicalState::Unknown.label(DeviceKind::Light), "Unknown");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicalState {
    /// Closed for turnouts, On for lights.
    Primary,
    /// Thrown for turnouts, Off for lights.
    Secondary,
    /// Any code other than the two defined ones.
    #[default]
    Unknown,
}

impl LogicalState {
    /// Returns the label this state has for a device kind.
    #[must_use]
    pub const fn label(&self, kind: DeviceKind) -> &'static str {
        match (self, kind.state_labels()) {
            (Self::Primary, Some((primary, _))) => primary,
            (Self::Secondary, Some((_, secondary))) => secondary,
            _ => "Unknown",
        }
    }

    /// Returns true unless the state is [`LogicalState::Unknown`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the sendable state, if there is one.
    #[must_use]
    pub const fn target(&self) -> Option<TargetState> {
        match self {
            Self::Primary => Some(TargetState::Primary),
            Self::Secondary => Some(TargetState::Secondary),
            Self::Unknown => None,
        }
    }
}

/// A state that can be requested from the server.
///
/// Unknown is deliberately absent: to leave a device untouched, omit the
/// state instead.
///
/// # Examples
///
/// ```
/// use jmri_panel::types::TargetState;
///
/// assert_eq!("thrown".parse::<TargetState>().unwrap(), TargetState::Secondary);
/// assert_eq!("ON".parse::<TargetState>().unwrap(), TargetState::Primary);
/// assert!("unknown".parse::<TargetState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetState {
    /// Closed for turnouts, On for lights.
    Primary,
    /// Thrown for turnouts, Off for lights.
    Secondary,
}

impl TargetState {
    /// Returns the label this state has for a device kind.
    #[must_use]
    pub const fn label(&self, kind: DeviceKind) -> &'static str {
        LogicalState::from_target(*self).label(kind)
    }
}

impl LogicalState {
    const fn from_target(target: TargetState) -> Self {
        match target {
            TargetState::Primary => Self::Primary,
            TargetState::Secondary => Self::Secondary,
        }
    }
}

impl From<TargetState> for LogicalState {
    fn from(target: TargetState) -> Self {
        Self::from_target(target)
    }
}

impl FromStr for TargetState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "closed" | "on" | "primary" => Ok(Self::Primary),
            "thrown" | "off" | "secondary" => Ok(Self::Secondary),
            _ => Err(ValueError::InvalidState(s.to_string())),
        }
    }
}

impl fmt::Display for LogicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_per_kind() {
        assert_eq!(LogicalState::Primary.label(DeviceKind::Turnout), "Closed");
        assert_eq!(LogicalState::Secondary.label(DeviceKind::Turnout), "Thrown");
        assert_eq!(LogicalState::Primary.label(DeviceKind::Light), "On");
        assert_eq!(LogicalState::Secondary.label(DeviceKind::Light), "Off");
        assert_eq!(
            LogicalState::Primary.label(DeviceKind::Locomotive),
            "Unknown"
        );
    }

    #[test]
    fn target_round_trips_through_logical() {
        for target in [TargetState::Primary, TargetState::Secondary] {
            assert_eq!(LogicalState::from(target).target(), Some(target));
        }
        assert_eq!(LogicalState::Unknown.target(), None);
        assert!(!LogicalState::Unknown.is_known());
    }

    #[test]
    fn target_from_str_invalid() {
        let err = "sideways".parse::<TargetState>().unwrap_err();
        assert_eq!(err, ValueError::InvalidState("sideways".to_string()));
    }

    #[test]
    fn target_label() {
        assert_eq!(TargetState::Secondary.label(DeviceKind::Light), "Off");
    }
}
