// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch requests and their validation.

use crate::error::ValueError;
use crate::state::DeviceFields;
use crate::types::{DeviceKind, TargetState};

use super::ProvisioningContext;

/// Largest number of devices one batch may create.
pub const MAX_BATCH_SIZE: usize = 64;

/// Parses the base address an operator typed.
///
/// Surrounding whitespace is ignored; anything other than a decimal `u32`
/// is rejected.
///
/// # Errors
///
/// Returns `ValueError::InvalidAddress` if the text is not a number.
///
/// # Examples
///
/// ```
/// use jmri_panel::batch::parse_base_address;
///
/// assert_eq!(parse_base_address(" 120 ").unwrap(), 120);
/// assert!(parse_base_address("12a").is_err());
/// assert!(parse_base_address("-1").is_err());
/// ```
pub fn parse_base_address(text: &str) -> Result<u32, ValueError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::InvalidAddress(text.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| ValueError::InvalidAddress(text.to_string()))
}

/// A request to create `count` devices at consecutive addresses.
///
/// Device `i` gets address `base_address + i` and identifier
/// `prefix + address`.
///
/// # Examples
///
/// ```
/// use jmri_panel::batch::BatchRequest;
/// use jmri_panel::types::DeviceKind;
///
/// let request = BatchRequest::new(DeviceKind::Light, "IL", 10).with_count(1000);
/// assert_eq!(request.clamped_count(), 64);
/// assert_eq!(request.identifier_for(12), "IL12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    kind: DeviceKind,
    prefix: String,
    base_address: u32,
    count: usize,
    base_display_name: String,
    desired_state: Option<TargetState>,
    comment: Option<String>,
    inverted: bool,
}

impl BatchRequest {
    /// Creates a request for a single device.
    #[must_use]
    pub fn new(kind: DeviceKind, prefix: impl Into<String>, base_address: u32) -> Self {
        Self {
            kind,
            prefix: prefix.into(),
            base_address,
            count: 1,
            base_display_name: String::new(),
            desired_state: None,
            comment: None,
            inverted: false,
        }
    }

    /// Sets how many devices to create. Clamped to `1..=64` when run.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the display name the batch's names are derived from.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.base_display_name = name.into();
        self
    }

    /// Sets the state every new device should be put in.
    #[must_use]
    pub fn with_state(mut self, state: TargetState) -> Self {
        self.desired_state = Some(state);
        self
    }

    /// Sets a comment stored on every new device.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Marks every new turnout as inverted. Ignored for other kinds.
    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Returns the device kind.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the identifier prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the first address.
    #[must_use]
    pub fn base_address(&self) -> u32 {
        self.base_address
    }

    /// Returns the requested count, before clamping.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the base display name.
    #[must_use]
    pub fn base_display_name(&self) -> &str {
        &self.base_display_name
    }

    /// Returns the requested initial state.
    #[must_use]
    pub fn desired_state(&self) -> Option<TargetState> {
        self.desired_state
    }

    /// Returns true if new devices are inverted.
    #[must_use]
    pub fn inverted(&self) -> bool {
        self.inverted && self.kind.supports_inversion()
    }

    /// Returns the count clamped to `1..=MAX_BATCH_SIZE`.
    #[must_use]
    pub fn clamped_count(&self) -> usize {
        self.count.clamp(1, MAX_BATCH_SIZE)
    }

    /// Returns the identifier of the device at `address`.
    #[must_use]
    pub fn identifier_for(&self, address: u32) -> String {
        format!("{}{address}", self.prefix)
    }

    /// Returns the extra fields sent with the device at `address`.
    #[must_use]
    pub fn fields_for(&self, address: u32) -> DeviceFields {
        DeviceFields {
            comment: self.comment.clone().filter(|c| !c.is_empty()),
            inverted: self.kind.supports_inversion().then_some(self.inverted),
            address: (self.kind == DeviceKind::Locomotive).then_some(address),
        }
    }

    /// Checks the request and returns its first and last address.
    pub(crate) fn validate(
        &self,
        context: &ProvisioningContext,
    ) -> Result<(u32, u32), ValueError> {
        if self.prefix.trim().is_empty() {
            return Err(ValueError::MissingPrefix);
        }
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(ValueError::InvalidPrefix(self.prefix.clone()));
        }
        if !context.accepts_prefix(&self.prefix) {
            return Err(ValueError::UnknownPrefix(self.prefix.clone()));
        }
        if self.desired_state.is_some() && !self.kind.has_state() {
            return Err(ValueError::StateNotSupported(self.kind));
        }

        let count = self.clamped_count();
        let last = u32::try_from(count - 1)
            .ok()
            .and_then(|offset| self.base_address.checked_add(offset))
            .ok_or(ValueError::AddressOverflow {
                base: self.base_address,
                count,
            })?;
        Ok((self.base_address, last))
    }
}
