// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-session provisioning context.

use crate::naming::{CollisionScope, NameSet};
use crate::state::DeviceRecord;

/// What the panel knows about the server when a batch starts.
///
/// The context is built once per session (or once before a batch), then
/// passed by reference. A batch only reads it; names the batch assigns are
/// tracked in a private copy. The snapshot may be stale if someone else edits
/// the server meanwhile, and two batches run against the same snapshot can
/// pick the same display name.
///
/// # Examples
///
/// ```
/// use jmri_panel::batch::ProvisioningContext;
/// use jmri_panel::naming::{CollisionScope, NameSet};
/// use jmri_panel::state::DeviceRecord;
/// use jmri_panel::types::DeviceKind;
///
/// let records = vec![DeviceRecord::new(DeviceKind::Turnout, "IT1").with_display_name("East")];
/// let context = ProvisioningContext::from_records(&records, CollisionScope::DisplayNames)
///     .with_known_prefixes(["IT"]);
///
/// assert!(context.existing().contains("east"));
/// assert!(context.accepts_prefix("IT"));
/// assert!(!context.accepts_prefix("LT"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningContext {
    existing: NameSet,
    known_prefixes: Vec<String>,
}

impl ProvisioningContext {
    /// Creates a context from a set of taken names.
    #[must_use]
    pub fn new(existing: NameSet) -> Self {
        Self {
            existing,
            known_prefixes: Vec::new(),
        }
    }

    /// Creates a context from registry records.
    #[must_use]
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a DeviceRecord>,
        scope: CollisionScope,
    ) -> Self {
        Self::new(NameSet::from_records(records, scope))
    }

    /// Restricts batches to identifiers starting with one of `prefixes`.
    ///
    /// An empty list accepts every prefix.
    #[must_use]
    pub fn with_known_prefixes<S: Into<String>>(
        mut self,
        prefixes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.known_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the snapshot of taken names.
    #[must_use]
    pub fn existing(&self) -> &NameSet {
        &self.existing
    }

    /// Returns the known device prefixes.
    #[must_use]
    pub fn known_prefixes(&self) -> &[String] {
        &self.known_prefixes
    }

    /// Returns true if `prefix` belongs to a known connection.
    #[must_use]
    pub fn accepts_prefix(&self, prefix: &str) -> bool {
        self.known_prefixes.is_empty()
            || self
                .known_prefixes
                .iter()
                .any(|known| prefix.starts_with(known.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prefix_list_accepts_everything() {
        let context = ProvisioningContext::default();
        assert!(context.accepts_prefix("anything"));
    }

    #[test]
    fn longer_prefix_of_known_connection_is_accepted() {
        let context = ProvisioningContext::default().with_known_prefixes(["IT"]);
        assert!(context.accepts_prefix("IT:AUTO:"));
        assert!(!context.accepts_prefix("I"));
    }
}
