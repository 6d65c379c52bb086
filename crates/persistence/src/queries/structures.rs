// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkstack_domain::{Project, ProjectId, Structure, StructureId};
use tracing::debug;

use crate::data_models::{ProjectRow, StructureRow};
use crate::diesel_schema::{projects, structures};
use crate::error::PersistenceError;

/// Retrieves a project by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_project(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
) -> Result<Option<Project>, PersistenceError> {
    debug!(project_id = %project_id, "Looking up project");

    projects::table
        .find(project_id.value())
        .select(ProjectRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_project: {e}")))?
        .map(Project::try_from)
        .transpose()
}

/// Retrieves a structure by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_structure(
    conn: &mut SqliteConnection,
    structure_id: StructureId,
) -> Result<Option<Structure>, PersistenceError> {
    debug!(structure_id = %structure_id, "Looking up structure");

    structures::table
        .find(structure_id.value())
        .select(StructureRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_structure: {e}")))?
        .map(Structure::try_from)
        .transpose()
}
