// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-kind naming policies.

use crate::types::DeviceKind;

use super::NameSet;

/// Text placed between a name and a newly added numeric suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Separator {
    /// `"Yard"` becomes `"Yard 2"`.
    #[default]
    Space,
    /// `"Yard"` becomes `"Yard-2"`.
    Dash,
    /// `"Yard"` becomes `"Yard2"`.
    None,
}

impl Separator {
    /// Returns the separator text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Dash => "-",
            Self::None => "",
        }
    }
}

/// Which existing names count as collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionScope {
    /// Only display names.
    DisplayNames,
    /// Display names and device identifiers.
    #[default]
    DisplayNamesAndIdentifiers,
}

/// How unique names are suggested for one device kind.
///
/// # Examples
///
/// ```
/// use jmri_panel::naming::{NameSet, NamingPolicy};
///
/// let existing: NameSet = ["Yard"].into_iter().collect();
/// let fallback = || "100".to_string();
///
/// assert_eq!(NamingPolicy::TURNOUT.suggest("Yard", &existing, true, fallback), "Yard 2");
/// assert_eq!(NamingPolicy::TURNOUT.suggest("", &existing, true, fallback), "100");
/// assert_eq!(NamingPolicy::TURNOUT.suggest("Siding", &existing, true, fallback), "Siding");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NamingPolicy {
    separator: Separator,
    scope: CollisionScope,
}

impl NamingPolicy {
    /// Policy for turnouts.
    pub const TURNOUT: Self =
        Self::new(Separator::Space, CollisionScope::DisplayNamesAndIdentifiers);

    /// Policy for lights.
    pub const LIGHT: Self =
        Self::new(Separator::Space, CollisionScope::DisplayNamesAndIdentifiers);

    /// Policy for roster entries and roster copies.
    ///
    /// Roster entries have no separate display name, so their ids count as
    /// taken names.
    pub const ROSTER: Self =
        Self::new(Separator::None, CollisionScope::DisplayNamesAndIdentifiers);

    /// Creates a policy.
    #[must_use]
    pub const fn new(separator: Separator, scope: CollisionScope) -> Self {
        Self { separator, scope }
    }

    /// Returns the default policy for a device kind.
    #[must_use]
    pub const fn for_kind(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Turnout => Self::TURNOUT,
            DeviceKind::Light => Self::LIGHT,
            DeviceKind::Locomotive => Self::ROSTER,
        }
    }

    /// Returns a copy with a different separator.
    #[must_use]
    pub const fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Returns a copy with a different collision scope.
    #[must_use]
    pub const fn with_scope(mut self, scope: CollisionScope) -> Self {
        self.scope = scope;
        self
    }

    /// Returns the separator.
    #[must_use]
    pub const fn separator(&self) -> Separator {
        self.separator
    }

    /// Returns the collision scope.
    #[must_use]
    pub const fn scope(&self) -> CollisionScope {
        self.scope
    }

    /// Suggests a name that is not in `existing`.
    ///
    /// * An empty `base` yields `fallback()`, whatever `existing` holds.
    /// * A free `base` is kept as-is for the first item of a batch.
    /// * Otherwise the trailing number of `base` is incremented (a name
    ///   without one starts at 2 after the separator) until the candidate is
    ///   free.
    ///
    /// The search ends within `existing.len() + 1` candidates. Should the
    /// suffix overflow `u64`, `fallback()` is returned.
    pub fn suggest(
        &self,
        base: &str,
        existing: &NameSet,
        is_first_in_batch: bool,
        fallback: impl FnOnce() -> String,
    ) -> String {
        let base = base.trim();
        if base.is_empty() {
            return fallback();
        }
        if is_first_in_batch && !existing.contains(base) {
            return base.to_string();
        }

        let (stem, mut suffix) = self.split(base);
        loop {
            let candidate = format!("{stem}{suffix}");
            if !existing.contains(&candidate) {
                return candidate;
            }
            match suffix.checked_add(1) {
                Some(next) => suffix = next,
                None => return fallback(),
            }
        }
    }

    /// Splits `base` into a stem and the first suffix to try.
    fn split(&self, base: &str) -> (String, u64) {
        let stem_len = base.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (stem, digits) = base.split_at(stem_len);

        match digits.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
            Some(next) => (stem.to_string(), next),
            None => (format!("{base}{}", self.separator.as_str()), 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::unwrap_records;

    fn no_fallback() -> String {
        "fallback".to_string()
    }

    #[test]
    fn increments_until_free() {
        let existing: NameSet = ["loco1", "loco2"].into_iter().collect();
        let name = NamingPolicy::ROSTER.suggest("loco1", &existing, false, no_fallback);
        assert_eq!(name, "loco3");
    }

    #[test]
    fn empty_base_uses_fallback() {
        let existing: NameSet = ["100", "fallback"].into_iter().collect();
        for first in [true, false] {
            let name = NamingPolicy::TURNOUT.suggest("", &existing, first, no_fallback);
            assert_eq!(name, "fallback");
        }
        let name = NamingPolicy::TURNOUT.suggest("   ", &NameSet::new(), true, no_fallback);
        assert_eq!(name, "fallback");
    }

    #[test]
    fn first_free_name_is_kept() {
        let name = NamingPolicy::TURNOUT.suggest("Yard 7", &NameSet::new(), true, no_fallback);
        assert_eq!(name, "Yard 7");
    }

    #[test]
    fn later_items_always_get_a_suffix() {
        let name = NamingPolicy::TURNOUT.suggest("Yard", &NameSet::new(), false, no_fallback);
        assert_eq!(name, "Yard 2");
        let name = NamingPolicy::TURNOUT.suggest("Yard 7", &NameSet::new(), false, no_fallback);
        assert_eq!(name, "Yard 8");
    }

    #[test]
    fn separators_differ_per_kind() {
        let existing: NameSet = ["Mogul"].into_iter().collect();
        assert_eq!(
            NamingPolicy::ROSTER.suggest("Mogul", &existing, true, no_fallback),
            "Mogul2"
        );
        assert_eq!(
            NamingPolicy::LIGHT.suggest("Mogul", &existing, true, no_fallback),
            "Mogul 2"
        );
        let dashed = NamingPolicy::TURNOUT.with_separator(Separator::Dash);
        assert_eq!(dashed.suggest("Mogul", &existing, true, no_fallback), "Mogul-2");
    }

    #[test]
    fn collision_check_ignores_case() {
        let existing: NameSet = ["YARD", "yard 2"].into_iter().collect();
        let name = NamingPolicy::TURNOUT.suggest("Yard", &existing, true, no_fallback);
        assert_eq!(name, "Yard 3");
    }

    #[test]
    fn leading_zeros_are_not_preserved() {
        let existing: NameSet = ["T007"].into_iter().collect();
        let name = NamingPolicy::ROSTER.suggest("T007", &existing, true, no_fallback);
        assert_eq!(name, "T8");
    }

    #[test]
    fn oversized_suffix_is_treated_as_text() {
        let base = "Lot99999999999999999999";
        let name = NamingPolicy::TURNOUT.suggest(base, &NameSet::new(), false, no_fallback);
        assert_eq!(name, format!("{base} 2"));
    }

    #[test]
    fn policy_for_kind() {
        assert_eq!(NamingPolicy::for_kind(DeviceKind::Turnout), NamingPolicy::TURNOUT);
        assert_eq!(NamingPolicy::for_kind(DeviceKind::Locomotive).separator(), Separator::None);
        assert_eq!(
            NamingPolicy::ROSTER.scope(),
            CollisionScope::DisplayNamesAndIdentifiers
        );
    }

    #[test]
    fn roster_ids_are_taken_names() {
        let payload = serde_json::json!([
            {"type": "rosterEntry", "data": {"name": "Mogul", "address": "3"}}
        ]);
        let records = unwrap_records(DeviceKind::Locomotive, &payload).unwrap();
        let policy = NamingPolicy::for_kind(DeviceKind::Locomotive);
        let existing = NameSet::from_records(&records, policy.scope());

        assert_eq!(existing.len(), 1);
        assert_eq!(policy.suggest("Mogul", &existing, true, no_fallback), "Mogul2");
    }
}
