// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `jmri_panel` - the core of a model-railroad control panel for JMRI.
//!
//! This library holds the logic a JMRI control panel shares between its
//! turnout, light and roster screens:
//!
//! - **State codec**: raw JMRI state codes plus the turnout "inverted" flag
//!   to Closed/Thrown, On/Off or Unknown, and back
//! - **Name suggestion**: unique display names, bumping a trailing number
//! - **Batch provisioning**: create up to 64 devices at consecutive addresses,
//!   collecting per-device failures instead of stopping
//! - **JMRI access**: an HTTP client for the JMRI JSON servlet (feature `http`)
//!
//! # Quick Start
//!
//! ```no_run
//! use jmri_panel::{BatchProvisioner, BatchRequest, DeviceKind, JmriClient, TargetState};
//!
//! #[tokio::main]
//! async fn main() -> jmri_panel::Result<()> {
//!     let client = JmriClient::new("layout.local")?;
//!
//!     // Snapshot of existing names and known prefixes, taken once.
//!     let context = client.load_context(DeviceKind::Turnout).await?;
//!
//!     let request = BatchRequest::new(DeviceKind::Turnout, "IT", 200)
//!         .with_count(4)
//!         .with_display_name("Hump")
//!         .with_state(TargetState::Primary);
//!
//!     let result = BatchProvisioner::new(client).provision(&request, &context).await?;
//!     println!("created {:?}", result.succeeded_addresses);
//!     Ok(())
//! }
//! ```
//!
//! ## Reading state
//!
//! ```
//! use jmri_panel::state::raw_to_logical;
//! use jmri_panel::types::{DeviceKind, LogicalState};
//!
//! let state = raw_to_logical(Some(4), false);
//! assert_eq!(state, LogicalState::Secondary);
//! assert_eq!(state.label(DeviceKind::Turnout), "Thrown");
//! ```

pub mod batch;
pub mod error;
pub mod event;
pub mod naming;
#[cfg(feature = "http")]
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use batch::{
    BatchFailure, BatchProvisioner, BatchRequest, BatchResult, DeviceRegistry, FailureStage,
    MAX_BATCH_SIZE, ProvisioningContext,
};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{BatchId, EventBus, ProvisionEvent};
pub use naming::{NameSet, NamingPolicy, Separator};
#[cfg(feature = "http")]
pub use protocol::{JmriClient, JmriConfig};
pub use response::{ConnectionSettings, SystemConnection};
pub use state::{DeviceFields, DeviceRecord, logical_to_raw, raw_to_logical};
pub use types::{DeviceKind, LogicalState, TargetState};
