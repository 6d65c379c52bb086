// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot geometry for Tower and Puzzle structures.
//!
//! A structure's geometry fully determines how many pallet slots it has
//! and the order in which their coordinates are emitted. The emission
//! order is what display numbers follow, so it must never change for an
//! existing geometry.
//!
//! - Tower: every level has every column. Coordinates are emitted
//!   row-major, levels outer.
//! - Puzzle: one column position per above-ground level is the shared
//!   lane, so each level contributes `columns - 1` slots. The lane itself
//!   has a single resting slot at `(level 1, last column)`, emitted after
//!   all regular above-ground slots. Below-ground levels have every column.

use crate::error::DomainError;
use crate::validation::MAX_TOTAL_SLOTS;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// The mechanical layout of a parking structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Vertical lift tower, no shared lane.
    Tower,
    /// Puzzle (lift-and-slide) system with one shared lane per level.
    Puzzle,
}

impl StructureKind {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tower => "tower",
            Self::Puzzle => "puzzle",
        }
    }
}

impl FromStr for StructureKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tower" => Ok(Self::Tower),
            "puzzle" => Ok(Self::Puzzle),
            _ => Err(DomainError::InvalidStructureKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The coordinates of one slot.
///
/// A slot sits either on an above-ground level or on a below-ground
/// level, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "placement", rename_all = "snake_case")]
pub enum SlotPosition {
    /// A slot on an above-ground level (1-based).
    AboveGround {
        /// The level number.
        level: u32,
        /// The column number.
        column: u32,
    },
    /// A slot on a below-ground level (1-based, counting downwards).
    BelowGround {
        /// The below-ground level number.
        level: u32,
        /// The column number.
        column: u32,
    },
}

impl SlotPosition {
    /// Rebuilds a position from its two nullable level columns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlotCoordinates` unless exactly one of
    /// `level` and `below_ground_level` is set.
    pub const fn from_columns(
        level: Option<u32>,
        below_ground_level: Option<u32>,
        column: u32,
    ) -> Result<Self, DomainError> {
        match (level, below_ground_level) {
            (Some(level), None) => Ok(Self::AboveGround { level, column }),
            (None, Some(level)) => Ok(Self::BelowGround { level, column }),
            _ => Err(DomainError::InvalidSlotCoordinates {
                level,
                below_ground_level,
            }),
        }
    }

    /// The above-ground level, or `None` for below-ground slots.
    #[must_use]
    pub const fn level(&self) -> Option<u32> {
        match self {
            Self::AboveGround { level, .. } => Some(*level),
            Self::BelowGround { .. } => None,
        }
    }

    /// The below-ground level, or `None` for above-ground slots.
    #[must_use]
    pub const fn below_ground_level(&self) -> Option<u32> {
        match self {
            Self::AboveGround { .. } => None,
            Self::BelowGround { level, .. } => Some(*level),
        }
    }

    /// The column number.
    #[must_use]
    pub const fn column(&self) -> u32 {
        match self {
            Self::AboveGround { column, .. } | Self::BelowGround { column, .. } => *column,
        }
    }

    /// Label of the level group this slot is listed under (`L2`, `B1`, ...).
    #[must_use]
    pub fn group_label(&self) -> String {
        match self {
            Self::AboveGround { level, .. } => format!("L{level}"),
            Self::BelowGround { level, .. } => format!("B{level}"),
        }
    }

    /// Compares two positions in listing order: level ascending with nulls
    /// last, then below-ground level ascending with nulls last, then column.
    #[must_use]
    pub fn listing_cmp(&self, other: &Self) -> Ordering {
        let key = |p: &Self| {
            (
                p.level().is_none(),
                p.level(),
                p.below_ground_level().is_none(),
                p.below_ground_level(),
                p.column(),
            )
        };
        key(self).cmp(&key(other))
    }
}

/// A validated structure geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    kind: StructureKind,
    levels_above_ground: u32,
    columns: u32,
    levels_below_ground: Option<u32>,
    total_slots: u32,
}

impl Geometry {
    /// Validates the raw geometry fields.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `levels_above_ground` or `columns` is zero
    /// - a Puzzle omits `levels_below_ground`
    /// - a Tower supplies `levels_below_ground`
    /// - the slot count exceeds [`MAX_TOTAL_SLOTS`]
    pub fn new(
        kind: StructureKind,
        levels_above_ground: u32,
        columns: u32,
        levels_below_ground: Option<u32>,
    ) -> Result<Self, DomainError> {
        if levels_above_ground == 0 {
            return Err(DomainError::InvalidGeometry {
                field: "levels_above_ground",
                reason: String::from("must be at least 1"),
            });
        }
        if columns == 0 {
            return Err(DomainError::InvalidGeometry {
                field: "columns",
                reason: String::from("must be at least 1"),
            });
        }

        let total_slots: Option<u32> = match (kind, levels_below_ground) {
            (StructureKind::Tower, None) => levels_above_ground.checked_mul(columns),
            (StructureKind::Tower, Some(_)) => {
                return Err(DomainError::UnexpectedBelowGroundLevels);
            }
            (StructureKind::Puzzle, None) => return Err(DomainError::MissingBelowGroundLevels),
            (StructureKind::Puzzle, Some(below)) => (columns - 1)
                .checked_mul(levels_above_ground)
                .and_then(|above| above.checked_add(1))
                .and_then(|above| columns.checked_mul(below).and_then(|b| above.checked_add(b))),
        };

        let total_slots: u32 = total_slots
            .filter(|total| *total <= MAX_TOTAL_SLOTS)
            .ok_or_else(|| DomainError::InvalidGeometry {
                field: "columns",
                reason: format!("slot count cannot exceed {MAX_TOTAL_SLOTS}"),
            })?;

        Ok(Self {
            kind,
            levels_above_ground,
            columns,
            levels_below_ground,
            total_slots,
        })
    }

    /// The structure kind.
    #[must_use]
    pub const fn kind(&self) -> StructureKind {
        self.kind
    }

    /// Number of above-ground levels.
    #[must_use]
    pub const fn levels_above_ground(&self) -> u32 {
        self.levels_above_ground
    }

    /// Number of physical columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of below-ground levels (Puzzle only).
    #[must_use]
    pub const fn levels_below_ground(&self) -> Option<u32> {
        self.levels_below_ground
    }

    /// Total number of slots this geometry yields.
    ///
    /// Tower: `L * C`. Puzzle: `(C - 1) * L + 1 + C * B`.
    #[must_use]
    pub const fn total_slots(&self) -> u32 {
        self.total_slots
    }

    /// Emits every slot coordinate in generation order.
    #[must_use]
    pub fn positions(&self) -> Vec<SlotPosition> {
        let mut positions: Vec<SlotPosition> = Vec::with_capacity(self.total_slots as usize);

        match self.kind {
            StructureKind::Tower => {
                for level in 1..=self.levels_above_ground {
                    for column in 1..=self.columns {
                        positions.push(SlotPosition::AboveGround { level, column });
                    }
                }
            }
            StructureKind::Puzzle => {
                for level in 1..=self.levels_above_ground {
                    for column in 1..self.columns {
                        positions.push(SlotPosition::AboveGround { level, column });
                    }
                }

                // Shared-lane resting slot.
                positions.push(SlotPosition::AboveGround {
                    level: 1,
                    column: self.columns,
                });

                for level in 1..=self.levels_below_ground.unwrap_or(0) {
                    for column in 1..=self.columns {
                        positions.push(SlotPosition::BelowGround { level, column });
                    }
                }
            }
        }

        positions
    }
}
