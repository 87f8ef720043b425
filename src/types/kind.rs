// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device kinds managed by the JMRI registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of device a record or request refers to.
///
/// Each kind has its own JSON servlet type and its own vocabulary for the
/// two defined states.
///
/// # Examples
///
/// ```
/// use jmri_panel::types::DeviceKind;
///
/// assert_eq!(DeviceKind::Turnout.json_type(), "turnout");
/// assert_eq!(DeviceKind::Light.state_labels(), Some(("On", "Off")));
/// assert!(!DeviceKind::Light.supports_inversion());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// A turnout (track switch).
    Turnout,
    /// A light or other on/off accessory.
    Light,
    /// A locomotive roster entry.
    Locomotive,
}

impl DeviceKind {
    /// Returns the JSON servlet type used for a single device.
    #[must_use]
    pub const fn json_type(&self) -> &'static str {
        match self {
            Self::Turnout => "turnout",
            Self::Light => "light",
            Self::Locomotive => "roster",
        }
    }

    /// Returns the JSON servlet type used to list all devices of this kind.
    #[must_use]
    pub const fn json_list_type(&self) -> &'static str {
        match self {
            Self::Turnout => "turnouts",
            Self::Light => "lights",
            Self::Locomotive => "roster",
        }
    }

    /// Returns the system-name type letter, if the kind uses system names.
    #[must_use]
    pub const fn type_letter(&self) -> Option<char> {
        match self {
            Self::Turnout => Some('T'),
            Self::Light => Some('L'),
            Self::Locomotive => None,
        }
    }

    /// Returns true if the kind carries an "inverted" flag.
    #[must_use]
    pub const fn supports_inversion(&self) -> bool {
        matches!(self, Self::Turnout)
    }

    /// Returns true if devices of this kind report a state.
    #[must_use]
    pub const fn has_state(&self) -> bool {
        !matches!(self, Self::Locomotive)
    }

    /// Returns the (primary, secondary) state labels for this kind.
    #[must_use]
    pub const fn state_labels(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Turnout => Some(("Closed", "Thrown")),
            Self::Light => Some(("On", "Off")),
            Self::Locomotive => None,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Turnout => "turnout",
            Self::Light => "light",
            Self::Locomotive => "locomotive",
        };
        write!(f, "{name}")
    }
}
