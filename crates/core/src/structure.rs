// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::StructureRepository;
use parkstack_domain::{
    DomainError, Geometry, MotionProfile, Project, ProjectId, Structure, StructureKind,
    validate_name,
};
use tracing::info;

/// Raw input for a new structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureDefinition {
    pub project_id: ProjectId,
    pub name: String,
    pub kind: StructureKind,
    pub levels_above_ground: u32,
    pub columns: u32,
    pub levels_below_ground: Option<u32>,
    pub motion: MotionProfile,
}

/// Defines a new structure in an existing project.
///
/// The geometry is validated here and is immutable afterwards. The
/// structure starts without an inventory.
///
/// # Errors
///
/// Returns an error if:
/// - The name or geometry is invalid
/// - The project does not exist
/// - The store fails
pub fn define_structure<S: StructureRepository>(
    store: &mut S,
    definition: &StructureDefinition,
) -> Result<Structure, CoreError> {
    let name: String = validate_name("name", &definition.name)?;
    let geometry: Geometry = Geometry::new(
        definition.kind,
        definition.levels_above_ground,
        definition.columns,
        definition.levels_below_ground,
    )?;

    let project: Project = store
        .project_by_id(definition.project_id)?
        .ok_or(DomainError::ProjectNotFound(definition.project_id))?;

    let structure: Structure =
        store.insert_structure(project.id, &name, &geometry, &definition.motion)?;

    info!(
        structure_id = %structure.id,
        project_id = %project.id,
        kind = %geometry.kind(),
        planned_slots = geometry.total_slots(),
        "Defined structure"
    );

    Ok(structure)
}
