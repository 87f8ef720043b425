// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provisioning event types.

use serde::{Deserialize, Serialize};

use crate::batch::FailureStage;
use crate::types::DeviceKind;

use super::BatchId;

/// Events emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProvisionEvent {
    /// The batch passed validation and is about to create devices.
    Started {
        /// The batch.
        batch_id: BatchId,
        /// Kind of device being created.
        kind: DeviceKind,
        /// Number of devices that will be attempted.
        count: usize,
    },

    /// A device was created, with its initial state if one was requested.
    DeviceCreated {
        /// The batch.
        batch_id: BatchId,
        /// Numeric address of the device.
        address: u32,
        /// Identifier of the device.
        identifier: String,
    },

    /// Creating or initialising a device failed.
    DeviceFailed {
        /// The batch.
        batch_id: BatchId,
        /// Numeric address of the device.
        address: u32,
        /// Step that failed.
        stage: FailureStage,
        /// Reason given by the registry.
        message: String,
    },

    /// Every address has been attempted.
    Finished {
        /// The batch.
        batch_id: BatchId,
        /// Number of addresses fully provisioned.
        succeeded: usize,
        /// Number of recorded failures.
        failed: usize,
    },
}

impl ProvisionEvent {
    /// Returns the batch this event belongs to.
    #[must_use]
    pub fn batch_id(&self) -> BatchId {
        match self {
            Self::Started { batch_id, .. }
            | Self::DeviceCreated { batch_id, .. }
            | Self::DeviceFailed { batch_id, .. }
            | Self::Finished { batch_id, .. } => *batch_id,
        }
    }

    /// Returns the device address, for per-device events.
    #[must_use]
    pub fn address(&self) -> Option<u32> {
        match self {
            Self::DeviceCreated { address, .. } | Self::DeviceFailed { address, .. } => {
                Some(*address)
            }
            Self::Started { .. } | Self::Finished { .. } => None,
        }
    }

    /// Returns `true` for the final event of a batch.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}
