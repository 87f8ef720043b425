// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Case-insensitive set of names already in use.

use std::collections::HashSet;

use crate::state::DeviceRecord;

use super::CollisionScope;

/// A set of taken names, compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    names: HashSet<String>,
}

impl NameSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from registry records.
    ///
    /// Display names are always included. Identifiers are included when the
    /// scope asks for them.
    #[must_use]
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a DeviceRecord>,
        scope: CollisionScope,
    ) -> Self {
        let mut set = Self::new();
        for record in records {
            set.reserve(record.identifier(), record.display_name(), scope);
        }
        set
    }

    /// Marks the names of one device as taken, following the same rule as
    /// [`NameSet::from_records`].
    pub fn reserve(
        &mut self,
        identifier: &str,
        display_name: Option<&str>,
        scope: CollisionScope,
    ) {
        if let Some(name) = display_name {
            self.insert(name);
        }
        if scope == CollisionScope::DisplayNamesAndIdentifiers {
            self.insert(identifier);
        }
    }

    /// Adds a name. Returns `true` if it was not present yet.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }

    /// Returns true if the name is taken, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}
