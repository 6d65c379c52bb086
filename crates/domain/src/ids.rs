// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Explicit identifier types for every persisted entity.
//!
//! Identifiers are assigned by the database. Wrapping them in distinct
//! types keeps a `SlotId` from ever being passed where a `CarId` is
//! expected, which matters in signatures like `claim(slot, car)`.

use serde::{Deserialize, Serialize};

/// Generates a copyable newtype around the database row identifier.
macro_rules! entity_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Identifies a project (the owning scope of structures and profiles).
    ProjectId
}

entity_id! {
    /// Identifies a physical parking structure.
    StructureId
}

entity_id! {
    /// Identifies one pallet slot inside a structure.
    SlotId
}

entity_id! {
    /// Identifies a user account.
    UserId
}

entity_id! {
    /// Identifies a registered car.
    CarId
}

entity_id! {
    /// Identifies a customer profile.
    CustomerId
}

entity_id! {
    /// Identifies an operator profile.
    OperatorId
}

entity_id! {
    /// Identifies a parking request.
    RequestId
}
