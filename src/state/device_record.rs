// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device records as known to the JMRI registry.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{DeviceKind, LogicalState};

use super::raw_to_logical;

/// A turnout, light or roster entry held by the registry.
///
/// # Examples
///
/// ```
/// use jmri_panel::state::DeviceRecord;
/// use jmri_panel::types::{DeviceKind, LogicalState};
///
/// let record = DeviceRecord::new(DeviceKind::Turnout, "IT12")
///     .with_display_name("Yard throat")
///     .with_raw_state(Some(2))
///     .with_inverted(true);
///
/// assert_eq!(record.logical_state(), LogicalState::Secondary);
/// assert_eq!(record.state_label(), "Thrown");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    kind: DeviceKind,
    identifier: String,
    display_name: Option<String>,
    comment: Option<String>,
    raw_state: Option<i32>,
    inverted: bool,
    address: Option<u32>,
    date_modified: Option<DateTime<Utc>>,
}

impl DeviceRecord {
    /// Creates a record with only its identifier set.
    #[must_use]
    pub fn new(kind: DeviceKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            display_name: None,
            comment: None,
            raw_state: None,
            inverted: false,
            address: None,
            date_modified: None,
        }
    }

    /// Sets the display (user) name. Empty names are stored as absent.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.display_name = (!name.is_empty()).then_some(name);
        self
    }

    /// Sets the free-text comment. Empty comments are stored as absent.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    /// Sets the raw state code.
    #[must_use]
    pub fn with_raw_state(mut self, raw_state: Option<i32>) -> Self {
        self.raw_state = raw_state;
        self
    }

    /// Sets the inversion flag. Ignored for kinds that cannot invert.
    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted && self.kind.supports_inversion();
        self
    }

    /// Sets the DCC address.
    #[must_use]
    pub fn with_address(mut self, address: Option<u32>) -> Self {
        self.address = address;
        self
    }

    /// Sets the last-modified timestamp.
    #[must_use]
    pub fn with_date_modified(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.date_modified = date;
        self
    }

    /// Returns the device kind.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the registry's unique, immutable name for the device.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the raw state code, if the server reported one.
    #[must_use]
    pub fn raw_state(&self) -> Option<i32> {
        self.raw_state
    }

    /// Returns the inversion flag.
    #[must_use]
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Returns the DCC address, if known.
    #[must_use]
    pub fn address(&self) -> Option<u32> {
        self.address
    }

    /// Returns when the record was last modified, if known.
    #[must_use]
    pub fn date_modified(&self) -> Option<DateTime<Utc>> {
        self.date_modified
    }

    /// Returns the logical state, recomputed from the raw code.
    #[must_use]
    pub fn logical_state(&self) -> LogicalState {
        if !self.kind.has_state() {
            return LogicalState::Unknown;
        }
        raw_to_logical(self.raw_state, self.inverted)
    }

    /// Returns the state in the device kind's vocabulary.
    #[must_use]
    pub fn state_label(&self) -> &'static str {
        self.logical_state().label(self.kind)
    }
}

/// Fields sent alongside a new device's identifier and display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceFields {
    /// Free-text comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Inversion flag, turnouts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
    /// DCC address, roster entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<u32>,
}

impl DeviceFields {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.inverted.is_none() && self.address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_derived_on_every_read() {
        let record = DeviceRecord::new(DeviceKind::Turnout, "IT1").with_raw_state(Some(4));
        assert_eq!(record.logical_state(), LogicalState::Secondary);

        let record = record.with_inverted(true);
        assert_eq!(record.logical_state(), LogicalState::Primary);
        assert_eq!(record.state_label(), "Closed");
    }

    #[test]
    fn lights_ignore_inversion() {
        let record = DeviceRecord::new(DeviceKind::Light, "IL1")
            .with_raw_state(Some(2))
            .with_inverted(true);
        assert!(!record.inverted());
        assert_eq!(record.state_label(), "On");
    }

    #[test]
    fn locomotives_are_always_unknown() {
        let record = DeviceRecord::new(DeviceKind::Locomotive, "GP9 1701").with_raw_state(Some(2));
        assert_eq!(record.logical_state(), LogicalState::Unknown);
    }

    #[test]
    fn empty_strings_are_absent() {
        let record = DeviceRecord::new(DeviceKind::Light, "IL1")
            .with_display_name("")
            .with_comment("");
        assert_eq!(record.display_name(), None);
        assert_eq!(record.comment(), None);
    }

    #[test]
    fn fields_skip_unset_values() {
        let fields = DeviceFields {
            inverted: Some(true),
            ..DeviceFields::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({ "inverted": true }));
        assert!(DeviceFields::default().is_empty());
    }
}
