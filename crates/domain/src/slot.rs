// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pallet slots and their car binding.

use crate::error::DomainError;
use crate::geometry::SlotPosition;
use crate::ids::{CarId, SlotId, StructureId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Persisted slot status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Released,
    Assigned,
}

impl SlotStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Assigned => "assigned",
        }
    }
}

impl FromStr for SlotStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "released" => Ok(Self::Released),
            "assigned" => Ok(Self::Assigned),
            _ => Err(DomainError::InvalidSlotStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a slot currently holds.
///
/// Status and car are one value here, so an assigned slot without a car
/// (or a released slot with one) cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "car_id", rename_all = "snake_case")]
pub enum SlotBinding {
    Released,
    Assigned(CarId),
}

impl SlotBinding {
    /// Rebuilds a binding from the stored status and car columns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentSlotBinding` when the status and the
    /// car column disagree.
    pub const fn from_columns(
        slot_id: SlotId,
        status: SlotStatus,
        car_id: Option<CarId>,
    ) -> Result<Self, DomainError> {
        match (status, car_id) {
            (SlotStatus::Released, None) => Ok(Self::Released),
            (SlotStatus::Assigned, Some(car_id)) => Ok(Self::Assigned(car_id)),
            _ => Err(DomainError::InconsistentSlotBinding { slot_id }),
        }
    }

    #[must_use]
    pub const fn status(&self) -> SlotStatus {
        match self {
            Self::Released => SlotStatus::Released,
            Self::Assigned(_) => SlotStatus::Assigned,
        }
    }

    #[must_use]
    pub const fn car_id(&self) -> Option<CarId> {
        match self {
            Self::Released => None,
            Self::Assigned(car_id) => Some(*car_id),
        }
    }
}

/// One pallet position inside a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub structure_id: StructureId,
    pub position: SlotPosition,
    /// Human-facing label, unique within the structure.
    pub display_number: u32,
    pub binding: SlotBinding,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Slot {
    #[must_use]
    pub const fn status(&self) -> SlotStatus {
        self.binding.status()
    }

    #[must_use]
    pub const fn car_id(&self) -> Option<CarId> {
        self.binding.car_id()
    }
}

/// A slot to be inserted, before the store has assigned its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSlot {
    pub position: SlotPosition,
    pub display_number: u32,
}
