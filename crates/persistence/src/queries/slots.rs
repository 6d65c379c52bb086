// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkstack_domain::{CarId, Slot, SlotId, SlotStatus, StructureId};
use tracing::debug;

use crate::data_models::{SlotRow, convert_rows};
use crate::diesel_schema::{inventory_generations, slots};
use crate::error::PersistenceError;

/// Retrieves a slot by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_slot(
    conn: &mut SqliteConnection,
    slot_id: SlotId,
) -> Result<Option<Slot>, PersistenceError> {
    slots::table
        .find(slot_id.value())
        .select(SlotRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_slot: {e}")))?
        .map(Slot::try_from)
        .transpose()
}

/// Lists a structure's slots: above-ground levels first, then below-ground
/// levels, each ascending, then by column.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_slots_for_structure(
    conn: &mut SqliteConnection,
    structure_id: StructureId,
) -> Result<Vec<Slot>, PersistenceError> {
    debug!(structure_id = %structure_id, "Listing slots");

    let rows: Vec<SlotRow> = slots::table
        .filter(slots::structure_id.eq(structure_id.value()))
        .order((
            slots::level.is_null(),
            slots::level.asc(),
            slots::below_ground_level.is_null(),
            slots::below_ground_level.asc(),
            slots::column_number.asc(),
        ))
        .select(SlotRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_slots_for_structure: {e}")))?;

    convert_rows(rows)
}

/// Lists the slots of a structure in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_slots_in_insertion_order(
    conn: &mut SqliteConnection,
    structure_id: StructureId,
) -> Result<Vec<Slot>, PersistenceError> {
    let rows: Vec<SlotRow> = slots::table
        .filter(slots::structure_id.eq(structure_id.value()))
        .order(slots::slot_id.asc())
        .select(SlotRow::as_select())
        .load(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("list_slots_in_insertion_order: {e}"))
        })?;

    convert_rows(rows)
}

/// Returns the assigned slot currently bound to `car_id`.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn assigned_slot_for_car(
    conn: &mut SqliteConnection,
    car_id: CarId,
) -> Result<Option<Slot>, PersistenceError> {
    slots::table
        .filter(slots::car_id.eq(car_id.value()))
        .filter(slots::status.eq(SlotStatus::Assigned.as_str()))
        .select(SlotRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("assigned_slot_for_car: {e}")))?
        .map(Slot::try_from)
        .transpose()
}

/// Returns `true` if the structure has a generation record or any slot.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn inventory_exists(
    conn: &mut SqliteConnection,
    structure_id: StructureId,
) -> Result<bool, PersistenceError> {
    let generations: i64 = inventory_generations::table
        .filter(inventory_generations::structure_id.eq(structure_id.value()))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("inventory_exists: {e}")))?;
    if generations > 0 {
        return Ok(true);
    }

    let slot_count: i64 = slots::table
        .filter(slots::structure_id.eq(structure_id.value()))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("inventory_exists: {e}")))?;

    Ok(slot_count > 0)
}
