// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkstack_domain::{ApprovalStatus, UserRole};

use crate::tests::helpers::{admin_only, seed};
use crate::{
    ApiError, BootstrapAdminRequest, CreateProfileRequest, RegisterCarRequest,
    RegisterUserRequest, SetApprovalStatusRequest, bootstrap_admin, create_customer,
    create_operator, register_car, register_user, set_customer_status, set_operator_status,
};

#[test]
fn test_bootstrap_only_once() {
    let (mut db, _) = admin_only();

    let err = bootstrap_admin(
        &mut db,
        &BootstrapAdminRequest {
            username: String::from("second"),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "bootstrap_once"));
}

#[test]
fn test_bootstrap_rejects_blank_username() {
    let mut db = parkstack_persistence::SqlitePersistence::new_in_memory().unwrap();

    let err = bootstrap_admin(
        &mut db,
        &BootstrapAdminRequest {
            username: String::from("   "),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "username"));
}

#[test]
fn test_duplicate_username_conflicts() {
    let (mut db, admin) = admin_only();
    let request = RegisterUserRequest {
        actor_user_id: admin,
        username: String::from("olivia"),
        role: UserRole::Operator,
    };
    register_user(&mut db, &request).unwrap();

    let err = register_user(&mut db, &request).unwrap_err();

    assert_eq!(
        err,
        ApiError::Conflict {
            rule: String::from("unique_username"),
            message: String::from("Username 'olivia' is already taken"),
        }
    );
}

#[test]
fn test_register_car_normalizes_plate() {
    let mut world = seed();

    let car = register_car(
        &mut world.db,
        &RegisterCarRequest {
            actor_user_id: world.admin,
            owner_user_id: world.customer_user,
            plate: String::from("  xyz-987 "),
            model: Some(String::from(" Estate ")),
        },
    )
    .unwrap()
    .response
    .car;

    assert_eq!(car.plate, "XYZ-987");
    assert_eq!(car.model.as_deref(), Some("Estate"));
    assert_eq!(car.owner_user_id.value(), world.customer_user);
}

#[test]
fn test_register_car_rejects_blank_model_and_unknown_owner() {
    let mut world = seed();

    let err = register_car(
        &mut world.db,
        &RegisterCarRequest {
            actor_user_id: world.admin,
            owner_user_id: world.customer_user,
            plate: String::from("XYZ-987"),
            model: Some(String::from("  ")),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "model"));

    let err = register_car(
        &mut world.db,
        &RegisterCarRequest {
            actor_user_id: world.admin,
            owner_user_id: 9999,
            plate: String::from("XYZ-987"),
            model: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "User"));
}

#[test]
fn test_profile_requires_matching_role() {
    let mut world = seed();
    let operator_user = world.add_user("otto", UserRole::Operator);

    let err = create_customer(
        &mut world.db,
        &CreateProfileRequest {
            actor_user_id: world.admin,
            user_id: operator_user,
            project_id: world.project,
            structure_id: world.structure,
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("user_id"),
            message: format!("User {operator_user} has role 'operator', expected 'customer'"),
        }
    );
}

#[test]
fn test_profile_scope_must_match_project() {
    let mut world = seed();
    let other_project = world.add_project("Elsewhere");
    let user = world.add_user("dana", UserRole::Customer);

    let err = create_customer(
        &mut world.db,
        &CreateProfileRequest {
            actor_user_id: world.admin,
            user_id: user,
            project_id: other_project,
            structure_id: world.structure,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "structure_id"));
}

#[test]
fn test_second_profile_for_user_conflicts() {
    let mut world = seed();

    let err = create_operator(
        &mut world.db,
        &CreateProfileRequest {
            actor_user_id: world.admin,
            user_id: world.operator_user,
            project_id: world.project,
            structure_id: world.structure,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "one_operator_profile"));
}

#[test]
fn test_new_profiles_start_pending() {
    let mut world = seed();
    let user = world.add_user("dana", UserRole::Customer);

    let customer = create_customer(
        &mut world.db,
        &CreateProfileRequest {
            actor_user_id: world.admin,
            user_id: user,
            project_id: world.project,
            structure_id: world.structure,
        },
    )
    .unwrap()
    .response
    .customer;

    assert_eq!(customer.status, ApprovalStatus::Pending);
    assert_eq!(customer.scope.structure_id.value(), world.structure);
}

#[test]
fn test_status_update_for_unknown_profile_not_found() {
    let mut world = seed();
    let request = SetApprovalStatusRequest {
        actor_user_id: world.admin,
        status: ApprovalStatus::Rejected,
    };

    let err = set_customer_status(&mut world.db, 4242, &request).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Customer"));

    let err = set_operator_status(&mut world.db, 4242, &request).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Operator"));

    let updated = set_operator_status(&mut world.db, world.operator, &request)
        .unwrap()
        .response
        .operator;
    assert_eq!(updated.status, ApprovalStatus::Rejected);
}

#[test]
fn test_non_positive_ids_rejected_before_lookup() {
    let mut world = seed();

    let err = set_customer_status(
        &mut world.db,
        0,
        &SetApprovalStatusRequest {
            actor_user_id: world.admin,
            status: ApprovalStatus::Approved,
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("customer_id"),
            message: String::from("customer_id must be a positive identifier, got 0"),
        }
    );
}
