// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw state code conversion.

use crate::types::{LogicalState, TargetState};

/// Raw code JMRI uses for Closed (turnouts) and On (lights).
pub const RAW_PRIMARY: i32 = 2;

/// Raw code JMRI uses for Thrown (turnouts) and Off (lights).
pub const RAW_SECONDARY: i32 = 4;

/// Swaps the two defined codes, leaving every other value untouched.
const fn swap(raw: i32) -> i32 {
    match raw {
        RAW_PRIMARY => RAW_SECONDARY,
        RAW_SECONDARY => RAW_PRIMARY,
        other => other,
    }
}

/// Maps a raw state code to its logical state.
///
/// `inverted` swaps the meaning of the two defined codes. Lights never set it.
/// Any code other than [`RAW_PRIMARY`] or [`RAW_SECONDARY`], including an
/// absent one, maps to [`LogicalState::Unknown`].
///
/// # Examples
///
/// ```
/// use jmri_panel::state::raw_to_logical;
/// use jmri_panel::types::LogicalState;
///
/// assert_eq!(raw_to_logical(Some(2), false), LogicalState::Primary);
/// assert_eq!(raw_to_logical(Some(8), true), LogicalState::Unknown);
/// assert_eq!(raw_to_logical(None, false), LogicalState::Unknown);
/// ```
#[must_use]
pub const fn raw_to_logical(raw: Option<i32>, inverted: bool) -> LogicalState {
    let Some(raw) = raw else {
        return LogicalState::Unknown;
    };
    let effective = if inverted { swap(raw) } else { raw };
    match effective {
        RAW_PRIMARY => LogicalState::Primary,
        RAW_SECONDARY => LogicalState::Secondary,
        _ => LogicalState::Unknown,
    }
}

/// Maps a requested state to the raw code to send to the server.
///
/// This is the exact inverse of [`raw_to_logical`] for the two defined codes.
#[must_use]
pub const fn logical_to_raw(target: TargetState, inverted: bool) -> i32 {
    let raw = match target {
        TargetState::Primary => RAW_PRIMARY,
        TargetState::Secondary => RAW_SECONDARY,
    };
    if inverted { swap(raw) } else { raw }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_mapping() {
        assert_eq!(raw_to_logical(Some(2), false), LogicalState::Primary);
        assert_eq!(raw_to_logical(Some(4), false), LogicalState::Secondary);
        assert_eq!(raw_to_logical(Some(2), true), LogicalState::Secondary);
        assert_eq!(raw_to_logical(Some(4), true), LogicalState::Primary);
    }

    #[test]
    fn undefined_codes_are_unknown() {
        for raw in [Some(0), Some(1), Some(3), Some(8), Some(-2), Some(i32::MAX), None] {
            assert_eq!(raw_to_logical(raw, false), LogicalState::Unknown);
            assert_eq!(raw_to_logical(raw, true), LogicalState::Unknown);
        }
    }

    #[test]
    fn reverse_is_inverse_of_forward() {
        for inverted in [false, true] {
            for target in [TargetState::Primary, TargetState::Secondary] {
                let raw = logical_to_raw(target, inverted);
                assert_eq!(raw_to_logical(Some(raw), inverted), target.into());
            }
        }
    }

    #[test]
    fn inversion_swaps_sent_code() {
        assert_eq!(logical_to_raw(TargetState::Secondary, false), RAW_SECONDARY);
        assert_eq!(logical_to_raw(TargetState::Secondary, true), RAW_PRIMARY);
    }
}
