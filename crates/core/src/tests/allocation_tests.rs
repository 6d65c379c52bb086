// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{Fixture, create_fixture};
use crate::{ClaimOutcome, CoreError, SlotDetail, SlotStore, assign_slot, release_slot};
use parkstack_domain::{
    ApprovalStatus, CarId, CustomerId, DomainError, ErrorKind, Scope, SlotId, SlotStatus,
    StructureKind, UserId, UserRole,
};

fn domain_err(result: Result<SlotDetail, CoreError>) -> DomainError {
    match result {
        Err(CoreError::DomainViolation(err)) => err,
        other => panic!("expected a domain violation, got {other:?}"),
    }
}

/// A second project with its own structure and approved customer.
fn foreign_scope(fixture: &mut Fixture) -> (Scope, CustomerId) {
    let project = fixture.store.add_project("Elsewhere");
    let structure = fixture
        .store
        .add_structure(project, StructureKind::Tower, 1, 1, None);
    let scope = Scope {
        project_id: project,
        structure_id: structure,
    };
    let user = fixture.store.add_user("faye", UserRole::Customer);
    fixture.store.add_car(user, "FOR-001");
    let customer = fixture
        .store
        .add_customer(user, scope, ApprovalStatus::Approved);
    (scope, customer)
}

#[test]
fn test_assign_binds_slot_and_hydrates_detail() {
    let mut fixture = create_fixture();
    let slot_id = fixture.slot_ids()[0];

    let detail = assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        fixture.customer,
        Some(fixture.car),
    )
    .unwrap();

    assert_eq!(detail.slot.id, slot_id);
    assert_eq!(detail.slot.status(), SlotStatus::Assigned);
    assert_eq!(detail.slot.car_id(), Some(fixture.car));
    assert_eq!(detail.structure.id, fixture.structure);
    assert_eq!(detail.project.id, fixture.project);

    let occupant = detail.occupant.unwrap();
    assert_eq!(occupant.car.id, fixture.car);
    assert_eq!(occupant.customer.unwrap().id, fixture.customer);

    assert_eq!(
        fixture.store.slot(slot_id).status(),
        SlotStatus::Assigned
    );
}

#[test]
fn test_assign_defaults_to_earliest_car() {
    let mut fixture = create_fixture();
    let second_car = fixture.store.add_car(fixture.customer_user, "ZZZ-999");
    let slot_id = fixture.slot_ids()[1];

    let detail = assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        fixture.customer,
        None,
    )
    .unwrap();

    assert_eq!(detail.slot.car_id(), Some(fixture.car));
    assert_ne!(detail.slot.car_id(), Some(second_car));
}

#[test]
fn test_assign_already_assigned_slot_conflicts() {
    let mut fixture = create_fixture();
    let slot_id = fixture.slot_ids()[0];
    assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        fixture.customer,
        None,
    )
    .unwrap();
    let (_, other_customer, other_car) = fixture.add_customer("dana", "DDD-444");

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        other_customer,
        Some(other_car),
    ));

    assert_eq!(err, DomainError::SlotAlreadyAssigned(slot_id));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.to_string().contains("already assigned to another customer"));
    assert_eq!(fixture.store.slot(slot_id).car_id(), Some(fixture.car));
}

#[test]
fn test_same_car_cannot_hold_two_slots() {
    let mut fixture = create_fixture();
    let slots = fixture.slot_ids();
    assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slots[0],
        fixture.customer,
        Some(fixture.car),
    )
    .unwrap();

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slots[1],
        fixture.customer,
        Some(fixture.car),
    ));

    assert_eq!(
        err,
        DomainError::CarAlreadyAssigned {
            car_id: fixture.car,
            slot_id: slots[0],
        }
    );
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(fixture.store.assigned_slots_for(fixture.car), 1);
    assert_eq!(
        fixture.store.slot(slots[1]).status(),
        SlotStatus::Released
    );
}

#[test]
fn test_store_claim_refuses_second_binding_for_car() {
    let mut fixture = create_fixture();
    let slots = fixture.slot_ids();

    let first = fixture.store.claim(slots[0], fixture.car).unwrap();
    assert!(matches!(first, ClaimOutcome::Claimed(_)));

    let second = fixture.store.claim(slots[1], fixture.car).unwrap();
    assert_eq!(second, ClaimOutcome::CarAlreadyBound { slot_id: slots[0] });

    let third = fixture.store.claim(slots[0], CarId::new(777)).unwrap();
    assert_eq!(third, ClaimOutcome::SlotNotReleased);
}

#[test]
fn test_unknown_operator_not_found() {
    let mut fixture = create_fixture();
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.customer_user,
        slot_id,
        fixture.customer,
        None,
    ));

    assert_eq!(
        err,
        DomainError::OperatorProfileNotFound {
            user_id: fixture.customer_user
        }
    );
}

#[test]
fn test_unknown_slot_not_found() {
    let mut fixture = create_fixture();

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        SlotId::new(9999),
        fixture.customer,
        None,
    ));

    assert_eq!(err, DomainError::SlotNotFound(SlotId::new(9999)));
}

#[test]
fn test_operator_from_other_project_is_rejected() {
    let mut fixture = create_fixture();
    let (scope, _) = foreign_scope(&mut fixture);
    let stranger = fixture.store.add_user("otto", UserRole::Operator);
    fixture
        .store
        .add_operator(stranger, scope, ApprovalStatus::Approved);
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(assign_slot(
        &mut fixture.store,
        stranger,
        slot_id,
        fixture.customer,
        None,
    ));

    assert!(matches!(err, DomainError::ScopeViolation { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fixture.store.slot(slot_id).status(), SlotStatus::Released);
}

#[test]
fn test_customer_from_other_project_is_rejected() {
    let mut fixture = create_fixture();
    let (_, foreign_customer) = foreign_scope(&mut fixture);
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        foreign_customer,
        None,
    ));

    assert!(matches!(err, DomainError::ScopeViolation { .. }));
}

#[test]
fn test_unapproved_customer_cannot_be_assigned() {
    let mut fixture = create_fixture();
    let user = fixture.store.add_user("penny", UserRole::Customer);
    fixture.store.add_car(user, "PEN-001");
    let pending = fixture
        .store
        .add_customer(user, fixture.scope, ApprovalStatus::Pending);
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        pending,
        None,
    ));

    assert_eq!(
        err,
        DomainError::CustomerNotApproved {
            customer_id: pending,
            status: ApprovalStatus::Pending,
        }
    );
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_car_of_another_user_not_found() {
    let mut fixture = create_fixture();
    let (_, _, other_car) = fixture.add_customer("dana", "DDD-444");
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        fixture.customer,
        Some(other_car),
    ));

    assert_eq!(
        err,
        DomainError::CarNotOwnedByCustomer {
            car_id: other_car,
            customer_id: fixture.customer,
        }
    );
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_customer_without_cars() {
    let mut fixture = create_fixture();
    let user = fixture.store.add_user("walker", UserRole::Customer);
    let carless = fixture
        .store
        .add_customer(user, fixture.scope, ApprovalStatus::Approved);
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        carless,
        None,
    ));

    assert_eq!(err, DomainError::CustomerHasNoCars(carless));
}

#[test]
fn test_unknown_customer_not_found() {
    let mut fixture = create_fixture();
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        CustomerId::new(4242),
        None,
    ));

    assert_eq!(err, DomainError::CustomerNotFound(CustomerId::new(4242)));
}

#[test]
fn test_release_returns_former_occupant() {
    let mut fixture = create_fixture();
    let slot_id = fixture.slot_ids()[2];
    assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        fixture.customer,
        None,
    )
    .unwrap();

    let detail = release_slot(&mut fixture.store, fixture.operator_user, slot_id).unwrap();

    assert_eq!(detail.slot.status(), SlotStatus::Released);
    assert_eq!(detail.slot.car_id(), None);
    let occupant = detail.occupant.unwrap();
    assert_eq!(occupant.car.id, fixture.car);
    assert_eq!(occupant.customer.unwrap().user_id, fixture.customer_user);
    assert_eq!(fixture.store.assigned_slots_for(fixture.car), 0);
}

#[test]
fn test_released_car_can_be_assigned_again() {
    let mut fixture = create_fixture();
    let slots = fixture.slot_ids();
    assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slots[0],
        fixture.customer,
        None,
    )
    .unwrap();
    release_slot(&mut fixture.store, fixture.operator_user, slots[0]).unwrap();

    let detail = assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slots[1],
        fixture.customer,
        None,
    )
    .unwrap();

    assert_eq!(detail.slot.car_id(), Some(fixture.car));
}

#[test]
fn test_release_of_released_slot_conflicts() {
    let mut fixture = create_fixture();
    let slot_id = fixture.slot_ids()[0];

    let err = domain_err(release_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
    ));

    assert_eq!(err, DomainError::SlotNotAssigned(slot_id));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_release_requires_operator_in_scope() {
    let mut fixture = create_fixture();
    let slot_id = fixture.slot_ids()[0];
    assign_slot(
        &mut fixture.store,
        fixture.operator_user,
        slot_id,
        fixture.customer,
        None,
    )
    .unwrap();

    let err = domain_err(release_slot(&mut fixture.store, UserId::new(31337), slot_id));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let (scope, _) = foreign_scope(&mut fixture);
    let stranger = fixture.store.add_user("otto", UserRole::Operator);
    fixture
        .store
        .add_operator(stranger, scope, ApprovalStatus::Approved);

    let err = domain_err(release_slot(&mut fixture.store, stranger, slot_id));
    assert!(matches!(err, DomainError::ScopeViolation { .. }));
    assert_eq!(
        fixture.store.slot(slot_id).status(),
        SlotStatus::Assigned
    );
}
