// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `jmri_panel` library.
//!
//! Validation failures abort a batch before any request reaches the server.
//! Device errors are raised by a [`DeviceRegistry`](crate::batch::DeviceRegistry)
//! and are folded into the batch result instead of being propagated.

use thiserror::Error;

use crate::types::DeviceKind;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A request failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a server payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device registry rejected an operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors raised while validating operator input.
///
/// These are reported synchronously, before any external call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The device prefix is empty.
    #[error("device prefix is required")]
    MissingPrefix,

    /// The device prefix contains characters JMRI does not accept.
    #[error("invalid device prefix: {0:?}")]
    InvalidPrefix(String),

    /// The prefix does not belong to any configured system connection.
    #[error("prefix {0:?} does not match any system connection")]
    UnknownPrefix(String),

    /// The base address text is not a decimal number.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    /// The last address of the batch does not fit in the address space.
    #[error("address range starting at {base} with {count} devices overflows")]
    AddressOverflow {
        /// First address of the batch.
        base: u32,
        /// Number of devices requested.
        count: usize,
    },

    /// An unrecognised state name was provided.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A state was requested for a device kind that has none.
    #[error("{0} devices have no state")]
    StateNotSupported(DeviceKind),
}

/// Errors related to HTTP communication with the JMRI server.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or canonical reason.
        message: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing JMRI payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from a record.
    #[error("missing field in payload: {0}")]
    MissingField(String),

    /// Unexpected payload shape.
    #[error("unexpected payload format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors raised by a device registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The registry refused to create the device.
    #[error("could not create {identifier}: {message}")]
    Creation {
        /// Identifier of the device that was being created.
        identifier: String,
        /// Reason given by the registry.
        message: String,
    },

    /// The registry refused to update the device.
    #[error("could not update {identifier}: {message}")]
    Update {
        /// Identifier of the device that was being updated.
        identifier: String,
        /// Reason given by the registry.
        message: String,
    },

    /// No system connection with that name exists.
    #[error("unknown system connection: {0}")]
    UnknownConnection(String),
}

impl DeviceError {
    /// Returns the registry's message without the identifier prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Creation { message, .. } | Self::Update { message, .. } => message,
            Self::UnknownConnection(name) => name,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::AddressOverflow {
            base: u32::MAX,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "address range starting at 4294967295 with 2 devices overflows"
        );
        assert_eq!(
            ValueError::MissingPrefix.to_string(),
            "device prefix is required"
        );
        assert_eq!(
            ValueError::StateNotSupported(DeviceKind::Locomotive).to_string(),
            "locomotive devices have no state"
        );
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidAddress("12a".to_string()).into();
        assert!(matches!(err, Error::Value(ValueError::InvalidAddress(_))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("name".to_string());
        assert_eq!(err.to_string(), "missing field in payload: name");
    }

    #[test]
    fn device_error_display_and_message() {
        let err = DeviceError::Creation {
            identifier: "IT101".to_string(),
            message: "duplicate name".to_string(),
        };
        assert_eq!(err.to_string(), "could not create IT101: duplicate name");
        assert_eq!(err.message(), "duplicate name");
    }
}
