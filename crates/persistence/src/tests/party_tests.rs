// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkstack::PartyDirectory;
use parkstack_domain::{ApprovalStatus, CustomerId, OperatorId, UserRole};

use crate::SqlitePersistence;
use crate::tests::helpers::{add_operator, seed};

#[test]
fn test_bootstrap_admin_only_on_empty_system() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();

    let admin = db.bootstrap_admin("root").unwrap().unwrap();
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.username, "root");

    assert!(db.bootstrap_admin("second").unwrap().is_none());
    assert!(db.get_user_by_username("second").unwrap().is_none());
}

#[test]
fn test_duplicate_username_is_constraint_violation() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    db.create_user("carl", UserRole::Customer).unwrap();

    let err = db.create_user("carl", UserRole::Operator).unwrap_err();

    assert!(err.is_constraint_violation(), "got {err}");
}

#[test]
fn test_one_profile_of_each_kind_per_user() {
    let mut seeded = seed();

    let err = seeded
        .db
        .create_customer(seeded.customer_user, seeded.scope)
        .unwrap_err();
    assert!(err.is_constraint_violation());

    let err = seeded
        .db
        .create_operator(seeded.operator_user, seeded.scope)
        .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn test_new_profiles_start_pending() {
    let mut seeded = seed();
    let user = seeded.db.create_user("pat", UserRole::Customer).unwrap();

    let customer = seeded.db.create_customer(user.id, seeded.scope).unwrap();

    assert_eq!(customer.status, ApprovalStatus::Pending);
    assert_eq!(customer.scope, seeded.scope);
}

#[test]
fn test_status_update_of_missing_profile_is_none() {
    let mut db = SqlitePersistence::new_in_memory().unwrap();

    assert!(
        db.set_customer_status(CustomerId::new(5), ApprovalStatus::Approved)
            .unwrap()
            .is_none()
    );
    assert!(
        db.set_operator_status(OperatorId::new(5), ApprovalStatus::Rejected)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_approved_operator_lookup_prefers_earliest() {
    let mut seeded = seed();
    let (_, later) = add_operator(&mut seeded.db, seeded.scope, "lena");

    let chosen = seeded
        .db
        .approved_operator_for_scope(seeded.scope)
        .unwrap()
        .unwrap();
    assert_eq!(chosen.id, seeded.operator);

    seeded
        .db
        .set_operator_status(seeded.operator, ApprovalStatus::Rejected)
        .unwrap();
    let chosen = seeded
        .db
        .approved_operator_for_scope(seeded.scope)
        .unwrap()
        .unwrap();
    assert_eq!(chosen.id, later);
}

#[test]
fn test_earliest_car_and_profile_lookups() {
    let mut seeded = seed();
    seeded
        .db
        .create_car(seeded.customer_user, "ZZZ-999", Some("Estate"))
        .unwrap();

    let earliest = seeded
        .db
        .earliest_car_for_user(seeded.customer_user)
        .unwrap()
        .unwrap();
    assert_eq!(earliest.id, seeded.car);

    let customer = seeded
        .db
        .customer_by_user(seeded.customer_user)
        .unwrap()
        .unwrap();
    assert_eq!(customer.id, seeded.customer);
    assert!(customer.status.is_approved());
    assert!(
        seeded
            .db
            .operator_by_user(seeded.customer_user)
            .unwrap()
            .is_none()
    );

    let user = seeded.db.user_by_id(seeded.operator_user).unwrap().unwrap();
    assert_eq!(user.role, UserRole::Operator);
}
