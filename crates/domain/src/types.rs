// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::geometry::Geometry;
use crate::ids::{ProjectId, StructureId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A project owns structures and scopes every customer and operator profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Motion timing parameters of a structure.
///
/// These are stored and returned as-is. Nothing in the allocation or
/// request lifecycle reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionProfile {
    pub seconds_per_level: Option<u32>,
    pub seconds_per_horizontal_move: Option<u32>,
    pub buffer_seconds: Option<u32>,
}

/// A physical parking structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Structure {
    pub id: StructureId,
    pub project_id: ProjectId,
    pub name: String,
    pub geometry: Geometry,
    /// Recorded when the inventory is generated; `None` until then.
    pub total_slots: Option<u32>,
    pub motion: MotionProfile,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Structure {
    /// Returns true once the slot inventory has been generated.
    #[must_use]
    pub const fn has_inventory(&self) -> bool {
        self.total_slots.is_some()
    }
}

/// The (project, structure) pair a customer or operator belongs to.
///
/// Requests are routed by matching a customer's scope against operator scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub project_id: ProjectId,
    pub structure_id: StructureId,
}

impl Scope {
    /// Builds a scope after checking the structure belongs to the project.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ScopeStructureMismatch` if `structure` is owned
    /// by a different project.
    pub fn for_structure(project_id: ProjectId, structure: &Structure) -> Result<Self, DomainError> {
        if structure.project_id != project_id {
            return Err(DomainError::ScopeStructureMismatch {
                project_id,
                structure_id: structure.id,
            });
        }

        Ok(Self {
            project_id,
            structure_id: structure.id,
        })
    }
}
