// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch outcome types.

use serde::{Deserialize, Serialize};

use crate::error::DeviceError;

/// The step at which a device failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// The registry refused to create the device.
    Create,
    /// The device exists but its initial state could not be set.
    SetState,
}

/// One address that was not fully provisioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Numeric address of the device.
    pub address: u32,
    /// Identifier the device was (or would have been) created with.
    pub identifier: String,
    /// Step that failed.
    pub stage: FailureStage,
    /// Reason given by the registry.
    pub message: String,
}

impl BatchFailure {
    pub(crate) fn new(
        address: u32,
        identifier: &str,
        stage: FailureStage,
        error: &DeviceError,
    ) -> Self {
        Self {
            address,
            identifier: identifier.to_string(),
            stage,
            message: error.message().to_string(),
        }
    }
}

/// Outcome of one batch.
///
/// An address appears in `succeeded_addresses` only if the device was
/// created and, when an initial state was requested, that state was set.
/// Every other attempted address appears in `failures`. Both lists are in
/// address order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Addresses that were fully provisioned.
    pub succeeded_addresses: Vec<u32>,
    /// Addresses that failed, with the reason.
    pub failures: Vec<BatchFailure>,
}

impl BatchResult {
    /// Returns true if at least one address was attempted and none failed.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty() && !self.succeeded_addresses.is_empty()
    }

    /// Returns true if no address succeeded.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.succeeded_addresses.is_empty()
    }

    /// Returns the number of devices that exist after the batch, including
    /// those whose initial state could not be set.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.succeeded_addresses.len()
            + self
                .failures
                .iter()
                .filter(|f| f.stage == FailureStage::SetState)
                .count()
    }

    /// Returns the addresses that failed, in order.
    #[must_use]
    pub fn failed_addresses(&self) -> Vec<u32> {
        self.failures.iter().map(|f| f.address).collect()
    }

    pub(crate) fn record_success(&mut self, address: u32) {
        self.succeeded_addresses.push(address);
    }

    pub(crate) fn record_failure(&mut self, failure: BatchFailure) {
        self.failures.push(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> BatchResult {
        let mut result = BatchResult::default();
        result.record_success(100);
        let duplicate = DeviceError::Creation {
            identifier: "IT101".to_string(),
            message: "duplicate".to_string(),
        };
        let timeout = DeviceError::Update {
            identifier: "IT102".to_string(),
            message: "timeout".to_string(),
        };
        result.record_failure(BatchFailure::new(101, "IT101", FailureStage::Create, &duplicate));
        result.record_failure(BatchFailure::new(102, "IT102", FailureStage::SetState, &timeout));
        result
    }

    #[test]
    fn partial_result() {
        let result = mixed();
        assert!(!result.is_complete_success());
        assert!(!result.is_total_failure());
        assert_eq!(result.failed_addresses(), vec![101, 102]);
        assert_eq!(result.created_count(), 2);
    }

    #[test]
    fn empty_result_is_total_failure() {
        let result = BatchResult::default();
        assert!(result.is_total_failure());
        assert!(!result.is_complete_success());
    }

    #[test]
    fn serializes_for_reporting() {
        let json = serde_json::to_value(mixed()).unwrap();
        assert_eq!(json["succeeded_addresses"], serde_json::json!([100]));
        assert_eq!(json["failures"][0]["stage"], "create");
    }
}
