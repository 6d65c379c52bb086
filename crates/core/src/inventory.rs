// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-time slot inventory generation and the full-detail slot listing.

use crate::allocation::{SlotOccupant, occupant_of};
use crate::error::CoreError;
use crate::store::{InventoryInsert, PartyDirectory, SlotStore, StructureRepository};
use parkstack_domain::{
    DomainError, NewSlot, Project, Slot, Structure, StructureId, display_number_range,
    validate_starting_number,
};
use tracing::{debug, info};

/// The slots created by [`generate_inventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInventory {
    pub structure_id: StructureId,
    /// Every created slot, in emission order.
    pub slots: Vec<Slot>,
    pub total_created: u32,
    pub starting_number: u32,
    pub ending_number: u32,
}

/// Materializes a structure's slot inventory.
///
/// Display numbers run from `starting_number` without gaps, in geometry
/// emission order. This can succeed at most once per structure.
///
/// # Errors
///
/// Returns an error if:
/// - `starting_number` is not a positive integer
/// - The structure does not exist
/// - The structure already has an inventory
/// - The display numbers would overflow
/// - The store fails
pub fn generate_inventory<S: StructureRepository + SlotStore>(
    store: &mut S,
    structure_id: StructureId,
    starting_number: i64,
) -> Result<GeneratedInventory, CoreError> {
    let start: u32 = validate_starting_number(starting_number)?;

    let structure: Structure = store
        .structure_by_id(structure_id)?
        .ok_or(DomainError::StructureNotFound(structure_id))?;

    if structure.has_inventory() {
        return Err(DomainError::InventoryAlreadyGenerated(structure_id).into());
    }

    let total: u32 = structure.geometry.total_slots();
    let (starting_number, ending_number) = display_number_range(start, total)?;

    let new_slots: Vec<NewSlot> = structure
        .geometry
        .positions()
        .into_iter()
        .zip(starting_number..=ending_number)
        .map(|(position, display_number)| NewSlot {
            position,
            display_number,
        })
        .collect();

    debug!(
        structure_id = %structure_id,
        count = new_slots.len(),
        "Inserting slot inventory"
    );

    match store.insert_inventory(structure_id, total, &new_slots)? {
        InventoryInsert::Inserted(slots) => {
            info!(
                structure_id = %structure_id,
                total_created = total,
                starting_number,
                ending_number,
                "Generated slot inventory"
            );

            Ok(GeneratedInventory {
                structure_id,
                slots,
                total_created: total,
                starting_number,
                ending_number,
            })
        }
        InventoryInsert::AlreadyGenerated => {
            Err(DomainError::InventoryAlreadyGenerated(structure_id).into())
        }
    }
}

/// One slot with whoever currently occupies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotListing {
    pub slot: Slot,
    /// `None` for released slots.
    pub occupant: Option<SlotOccupant>,
}

/// Consecutive slots sharing a level (`L1`, `L2`, ..., `B1`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGroup {
    pub label: String,
    pub slots: Vec<SlotListing>,
}

/// Every slot of a structure, grouped by level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSlots {
    pub structure: Structure,
    pub project: Project,
    pub groups: Vec<SlotGroup>,
}

/// Lists a structure's slots with their occupants, grouped by level.
///
/// Above-ground levels come first in ascending order, then below-ground
/// levels; within a level, slots are ordered by column.
///
/// # Errors
///
/// Returns an error if the structure or its project does not exist, or
/// the store fails.
pub fn list_structure_slots<S: StructureRepository + SlotStore + PartyDirectory>(
    store: &mut S,
    structure_id: StructureId,
) -> Result<StructureSlots, CoreError> {
    let structure: Structure = store
        .structure_by_id(structure_id)?
        .ok_or(DomainError::StructureNotFound(structure_id))?;
    let project: Project = store
        .project_by_id(structure.project_id)?
        .ok_or(DomainError::ProjectNotFound(structure.project_id))?;

    let mut slots: Vec<Slot> = store.list_by_structure(structure_id)?;
    // Grouping below relies on listing order.
    slots.sort_by(|a, b| a.position.listing_cmp(&b.position));

    let mut groups: Vec<SlotGroup> = Vec::new();
    for slot in slots {
        let occupant: Option<SlotOccupant> = match slot.car_id() {
            Some(car_id) => Some(occupant_of(store, car_id)?),
            None => None,
        };
        let label: String = slot.position.group_label();

        let listing = SlotListing { slot, occupant };
        match groups.last_mut() {
            Some(group) if group.label == label => group.slots.push(listing),
            _ => groups.push(SlotGroup {
                label,
                slots: vec![listing],
            }),
        }
    }

    Ok(StructureSlots {
        structure,
        project,
        groups,
    })
}
