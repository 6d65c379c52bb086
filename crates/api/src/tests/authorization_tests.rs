// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkstack_domain::RequestStatus;

use crate::tests::helpers::{seed, tower_request};
use crate::{
    ActorRequest, ApiError, AssignSlotRequest, CreateParkingRequest, CreateProjectRequest,
    GenerateInventoryRequest, UpdateRequestStatusRequest, assign_slot, create_parking_request,
    create_project, define_structure, generate_inventory, list_my_requests,
    list_operator_requests, list_structure_slots, release_slot, update_request_status,
};

fn assert_unauthorized(err: &ApiError, expected_action: &str) {
    match err {
        ApiError::Unauthorized { action, .. } => assert_eq!(action, expected_action),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_unknown_actor_fails_authentication() {
    let mut world = seed();

    let err = create_project(
        &mut world.db,
        &CreateProjectRequest {
            actor_user_id: 9999,
            name: String::from("Ghost"),
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::AuthenticationFailed {
            reason: String::from("Unknown actor user 9999"),
        }
    );
}

#[test]
fn test_non_positive_actor_fails_authentication() {
    let mut world = seed();

    let err = list_operator_requests(&mut world.db, -1).unwrap_err();

    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_only_admins_provision() {
    let mut world = seed();

    let err = create_project(
        &mut world.db,
        &CreateProjectRequest {
            actor_user_id: world.operator_user,
            name: String::from("Rogue"),
        },
    )
    .unwrap_err();
    assert_unauthorized(&err, "create_project");
    assert_eq!(
        err.to_string(),
        "Unauthorized: 'create_project' requires admin role"
    );

    let err = define_structure(
        &mut world.db,
        &tower_request(world.customer_user, world.project, 1, 1),
    )
    .unwrap_err();
    assert_unauthorized(&err, "define_structure");

    let err = generate_inventory(
        &mut world.db,
        world.structure,
        &GenerateInventoryRequest {
            actor_user_id: world.operator_user,
            starting_number: 1,
        },
    )
    .unwrap_err();
    assert_unauthorized(&err, "generate_inventory");
}

#[test]
fn test_only_operators_allocate() {
    let mut world = seed();

    let err = assign_slot(
        &mut world.db,
        world.slots[0],
        &AssignSlotRequest {
            actor_user_id: world.admin,
            customer_id: world.customer,
            car_id: None,
        },
    )
    .unwrap_err();
    assert_unauthorized(&err, "assign_slot");

    let err = release_slot(
        &mut world.db,
        world.slots[0],
        &ActorRequest {
            actor_user_id: world.customer_user,
        },
    )
    .unwrap_err();
    assert_unauthorized(&err, "release_slot");
}

#[test]
fn test_request_roles_are_enforced() {
    let mut world = seed();

    let err = create_parking_request(
        &mut world.db,
        &CreateParkingRequest {
            actor_user_id: world.operator_user,
            car_id: world.car,
        },
    )
    .unwrap_err();
    assert_unauthorized(&err, "create_request");

    let err = list_operator_requests(&mut world.db, world.customer_user).unwrap_err();
    assert_unauthorized(&err, "list_operator_requests");

    let err = list_my_requests(&mut world.db, world.operator_user).unwrap_err();
    assert_unauthorized(&err, "list_my_requests");

    let err = update_request_status(
        &mut world.db,
        1,
        &UpdateRequestStatusRequest {
            actor_user_id: world.customer_user,
            status: RequestStatus::Completed,
        },
    )
    .unwrap_err();
    assert_unauthorized(&err, "update_request_status");
}

#[test]
fn test_customers_cannot_list_slots() {
    let mut world = seed();

    let err = list_structure_slots(&mut world.db, world.structure, world.customer_user).unwrap_err();

    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("list_structure_slots"),
            required_role: String::from("admin or operator"),
        }
    );
}
