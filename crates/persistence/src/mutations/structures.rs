// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project, structure, and inventory mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkstack::InventoryInsert;
use parkstack_domain::{
    Geometry, MotionProfile, NewSlot, Project, ProjectId, SlotStatus, Structure, StructureId,
};
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewSlotRow, now_timestamp};
use crate::diesel_schema::{inventory_generations, projects, slots, structures};
use crate::error::PersistenceError;
use crate::queries::slots::{inventory_exists, list_slots_in_insertion_order};
use crate::queries::structures::{get_project, get_structure};

/// Rows per multi-row `INSERT`, kept well under `SQLite`'s bind limit.
const SLOT_INSERT_CHUNK: usize = 500;

/// Creates a project.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_project(conn: &mut SqliteConnection, name: &str) -> Result<Project, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(projects::table)
        .values((projects::name.eq(name), projects::created_at.eq(&now)))
        .execute(conn)?;

    let project_id: ProjectId = ProjectId::new(conn.get_last_insert_rowid()?);
    info!(project_id = %project_id, name, "Created project");

    get_project(conn, project_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("project {project_id}")))
}

/// Creates a structure with no inventory.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_structure(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
    name: &str,
    geometry: &Geometry,
    motion: &MotionProfile,
) -> Result<Structure, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(structures::table)
        .values((
            structures::project_id.eq(project_id.value()),
            structures::name.eq(name),
            structures::kind.eq(geometry.kind().as_str()),
            structures::levels_above_ground.eq(i64::from(geometry.levels_above_ground())),
            structures::column_count.eq(i64::from(geometry.columns())),
            structures::levels_below_ground.eq(geometry.levels_below_ground().map(i64::from)),
            structures::seconds_per_level.eq(motion.seconds_per_level.map(i64::from)),
            structures::seconds_per_horizontal_move
                .eq(motion.seconds_per_horizontal_move.map(i64::from)),
            structures::buffer_seconds.eq(motion.buffer_seconds.map(i64::from)),
            structures::created_at.eq(&now),
        ))
        .execute(conn)?;

    let structure_id: StructureId = StructureId::new(conn.get_last_insert_rowid()?);
    info!(
        structure_id = %structure_id,
        project_id = %project_id,
        kind = %geometry.kind(),
        "Created structure"
    );

    get_structure(conn, structure_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("structure {structure_id}")))
}

/// Inserts the whole inventory of a structure and records its slot count.
///
/// The generation record, every slot, and `total_slots` are written in one
/// immediate transaction. If the structure already has a generation record
/// or any slot, nothing is written.
///
/// # Errors
///
/// Returns an error if a write fails; the transaction is rolled back.
pub fn insert_inventory(
    conn: &mut SqliteConnection,
    structure_id: StructureId,
    total_slots: u32,
    new_slots: &[NewSlot],
) -> Result<InventoryInsert, PersistenceError> {
    conn.immediate_transaction(|conn| {
        if inventory_exists(conn, structure_id)? {
            warn!(structure_id = %structure_id, "Inventory already generated");
            return Ok(InventoryInsert::AlreadyGenerated);
        }

        let now: String = now_timestamp()?;
        let starting_number: i64 = new_slots
            .iter()
            .map(|slot| i64::from(slot.display_number))
            .min()
            .unwrap_or_default();

        let recorded = diesel::insert_into(inventory_generations::table)
            .values((
                inventory_generations::structure_id.eq(structure_id.value()),
                inventory_generations::starting_number.eq(starting_number),
                inventory_generations::total_slots.eq(i64::from(total_slots)),
                inventory_generations::generated_at.eq(&now),
            ))
            .execute(conn)
            .map_err(PersistenceError::from);
        match recorded {
            Ok(_) => {}
            Err(PersistenceError::ConstraintViolation(msg)) => {
                warn!(structure_id = %structure_id, %msg, "Generation record already present");
                return Ok(InventoryInsert::AlreadyGenerated);
            }
            Err(e) => return Err(e),
        }

        let rows: Vec<NewSlotRow<'_>> = new_slots
            .iter()
            .map(|slot| NewSlotRow {
                structure_id: structure_id.value(),
                level: slot.position.level().map(i64::from),
                below_ground_level: slot.position.below_ground_level().map(i64::from),
                column_number: i64::from(slot.position.column()),
                display_number: i64::from(slot.display_number),
                status: SlotStatus::Released.as_str(),
                updated_at: &now,
            })
            .collect();
        for chunk in rows.chunks(SLOT_INSERT_CHUNK) {
            diesel::insert_into(slots::table).values(chunk).execute(conn)?;
        }
        debug!(structure_id = %structure_id, count = rows.len(), "Inserted slots");

        diesel::update(structures::table.find(structure_id.value()))
            .set(structures::total_slots.eq(Some(i64::from(total_slots))))
            .execute(conn)?;

        let created = list_slots_in_insertion_order(conn, structure_id)?;
        info!(
            structure_id = %structure_id,
            total_slots,
            starting_number,
            "Generated inventory"
        );

        Ok(InventoryInsert::Inserted(created))
    })
}
