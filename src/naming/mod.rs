// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unique name suggestion.
//!
//! When an operator creates several devices at once, or copies a roster
//! entry, the panel proposes display names that do not collide with names
//! already on the server. [`NamingPolicy::suggest`] bumps a trailing number
//! until the name is free; comparisons are case-insensitive.
//!
//! Turnouts and lights separate a new numeric suffix with a space
//! (`"Yard"` becomes `"Yard 2"`). Roster copies append it directly
//! (`"Mogul"` becomes `"Mogul2"`).
//!
//! # Examples
//!
//! ```
//! use jmri_panel::naming::{NameSet, NamingPolicy};
//!
//! let existing: NameSet = ["loco1", "LOCO2"].into_iter().collect();
//! let name = NamingPolicy::ROSTER.suggest("loco1", &existing, false, || "3".to_string());
//! assert_eq!(name, "loco3");
//! ```

mod name_set;
mod policy;

pub use name_set::NameSet;
pub use policy::{CollisionScope, NamingPolicy, Separator};
