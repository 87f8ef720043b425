// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device registry seam.

use crate::error::DeviceError;
use crate::state::{DeviceFields, DeviceRecord};
use crate::types::DeviceKind;

/// The external registry that owns devices.
///
/// [`JmriClient`](crate::protocol::JmriClient) implements this over HTTP.
/// Tests and other front-ends can supply their own implementation.
#[allow(async_fn_in_trait)]
pub trait DeviceRegistry {
    /// Creates a device.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Creation` if the identifier is taken or invalid,
    /// or if the registry cannot be reached.
    async fn create_device(
        &self,
        kind: DeviceKind,
        identifier: &str,
        display_name: Option<&str>,
        fields: &DeviceFields,
    ) -> Result<DeviceRecord, DeviceError>;

    /// Sets the raw state of an existing device.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Update` if the identifier is unknown or the
    /// registry cannot be reached.
    async fn set_state(
        &self,
        kind: DeviceKind,
        identifier: &str,
        raw_state: i32,
    ) -> Result<(), DeviceError>;
}

impl<R: DeviceRegistry + ?Sized> DeviceRegistry for &R {
    async fn create_device(
        &self,
        kind: DeviceKind,
        identifier: &str,
        display_name: Option<&str>,
        fields: &DeviceFields,
    ) -> Result<DeviceRecord, DeviceError> {
        (**self)
            .create_device(kind, identifier, display_name, fields)
            .await
    }

    async fn set_state(
        &self,
        kind: DeviceKind,
        identifier: &str,
        raw_state: i32,
    ) -> Result<(), DeviceError> {
        (**self).set_state(kind, identifier, raw_state).await
    }
}
