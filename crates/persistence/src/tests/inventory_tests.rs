// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkstack::{
    CoreError, GeneratedInventory, InventoryInsert, SlotStore, StructureRepository,
    StructureSlots, generate_inventory, list_structure_slots,
};
use parkstack_domain::{
    DomainError, ErrorKind, MotionProfile, NewSlot, SlotPosition, SlotStatus, StructureKind,
};

use crate::SqlitePersistence;
use crate::tests::helpers::{add_structure, seed};

#[test]
fn test_tower_inventory_is_persisted_in_order() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let project = db.create_project("Harbour").unwrap().id;
    let structure = add_structure(&mut db, project, StructureKind::Tower, 3, 2, None);

    let inventory: GeneratedInventory = generate_inventory(&mut db, structure, 100).unwrap();

    assert_eq!(inventory.total_created, 6);
    assert_eq!(inventory.ending_number, 105);
    let numbers: Vec<u32> = inventory.slots.iter().map(|s| s.display_number).collect();
    assert_eq!(numbers, vec![100, 101, 102, 103, 104, 105]);
    assert_eq!(
        inventory.slots[2].position,
        SlotPosition::AboveGround {
            level: 2,
            column: 1
        }
    );
    assert!(
        inventory
            .slots
            .iter()
            .all(|s| s.status() == SlotStatus::Released && s.car_id().is_none())
    );

    let stored = db.structure_by_id(structure).unwrap().unwrap();
    assert_eq!(stored.total_slots, Some(6));
    assert_eq!(db.list_by_structure(structure).unwrap().len(), 6);
}

#[test]
fn test_puzzle_inventory_round_trips_positions() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let project = db.create_project("Harbour").unwrap().id;
    let structure = add_structure(&mut db, project, StructureKind::Puzzle, 2, 3, Some(1));

    let inventory = generate_inventory(&mut db, structure, 1).unwrap();
    assert_eq!(inventory.total_created, 8);

    let listed = db.list_by_structure(structure).unwrap();
    let positions: Vec<SlotPosition> = listed.iter().map(|s| s.position).collect();
    assert_eq!(
        positions,
        vec![
            SlotPosition::AboveGround { level: 1, column: 1 },
            SlotPosition::AboveGround { level: 1, column: 2 },
            SlotPosition::AboveGround { level: 1, column: 3 },
            SlotPosition::AboveGround { level: 2, column: 1 },
            SlotPosition::AboveGround { level: 2, column: 2 },
            SlotPosition::BelowGround { level: 1, column: 1 },
            SlotPosition::BelowGround { level: 1, column: 2 },
            SlotPosition::BelowGround { level: 1, column: 3 },
        ]
    );
}

#[test]
fn test_second_generation_conflicts_without_writing() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let project = db.create_project("Harbour").unwrap().id;
    let structure = add_structure(&mut db, project, StructureKind::Tower, 2, 2, None);
    generate_inventory(&mut db, structure, 1).unwrap();

    let err = generate_inventory(&mut db, structure, 50).unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::InventoryAlreadyGenerated(structure))
    );
    let numbers: Vec<u32> = db
        .list_by_structure(structure)
        .unwrap()
        .iter()
        .map(|s| s.display_number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_store_refuses_second_inventory_insert() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let project = db.create_project("Harbour").unwrap().id;
    let structure = add_structure(&mut db, project, StructureKind::Tower, 1, 1, None);
    let slot = NewSlot {
        position: SlotPosition::AboveGround {
            level: 1,
            column: 1,
        },
        display_number: 1,
    };

    let first = db.insert_inventory(structure, 1, &[slot]).unwrap();
    assert!(matches!(first, InventoryInsert::Inserted(ref slots) if slots.len() == 1));

    let second = db.insert_inventory(structure, 1, &[slot]).unwrap();
    assert_eq!(second, InventoryInsert::AlreadyGenerated);
    assert_eq!(db.list_by_structure(structure).unwrap().len(), 1);
}

#[test]
fn test_numbering_is_per_structure() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let project = db.create_project("Harbour").unwrap().id;
    let first = add_structure(&mut db, project, StructureKind::Tower, 1, 2, None);
    let second = add_structure(&mut db, project, StructureKind::Tower, 1, 2, None);

    generate_inventory(&mut db, first, 1).unwrap();
    let inventory = generate_inventory(&mut db, second, 1).unwrap();

    assert_eq!(inventory.starting_number, 1);
    assert_eq!(inventory.ending_number, 2);
}

#[test]
fn test_large_inventory_spans_insert_chunks() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let project = db.create_project("Harbour").unwrap().id;
    let structure = add_structure(&mut db, project, StructureKind::Tower, 30, 40, None);

    let inventory = generate_inventory(&mut db, structure, 1).unwrap();

    assert_eq!(inventory.total_created, 1200);
    assert_eq!(inventory.slots.last().unwrap().display_number, 1200);
}

#[test]
fn test_motion_profile_is_stored_verbatim() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let project = db.create_project("Harbour").unwrap().id;
    let geometry = parkstack_domain::Geometry::new(StructureKind::Tower, 2, 2, None).unwrap();
    let motion = MotionProfile {
        seconds_per_level: Some(11),
        seconds_per_horizontal_move: None,
        buffer_seconds: Some(30),
    };

    let created = db
        .insert_structure(project, "Quay Tower", &geometry, &motion)
        .unwrap();
    let stored = db.structure_by_id(created.id).unwrap().unwrap();

    assert_eq!(stored.motion, motion);
    assert_eq!(stored.geometry, geometry);
    assert_eq!(stored.total_slots, None);
}

#[test]
fn test_listing_hydrates_occupant_from_database() {
    let mut seeded = seed();
    let slot = seeded.slots[4];
    parkstack::assign_slot(
        &mut seeded.db,
        seeded.operator_user,
        slot,
        seeded.customer,
        None,
    )
    .unwrap();

    let listing: StructureSlots = list_structure_slots(&mut seeded.db, seeded.structure).unwrap();

    assert_eq!(listing.project.id, seeded.project);
    let labels: Vec<&str> = listing.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["L1", "L2", "L3"]);
    let occupant = listing.groups[2].slots[0].occupant.as_ref().unwrap();
    assert_eq!(occupant.car.plate, "ABC-123");
    assert_eq!(
        occupant.customer.as_ref().map(|c| c.id),
        Some(seeded.customer)
    );
}

#[test]
fn test_generation_of_unknown_structure_not_found() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let err = generate_inventory(&mut db, parkstack_domain::StructureId::new(9), 1).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}
