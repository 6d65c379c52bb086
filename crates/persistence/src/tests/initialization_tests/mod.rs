// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use parkstack::StructureRepository;
use parkstack_domain::{Project, UserId, UserRole};

use crate::backend::sqlite::MIGRATIONS;
use crate::diesel_schema::cars;
use crate::error::PersistenceError;
use crate::SqlitePersistence;

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_active() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());

    let err = persistence
        .create_car(UserId::new(404), "NO-OWNER", None)
        .unwrap_err();
    assert!(err.is_constraint_violation(), "got {err}");
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = SqlitePersistence::new_in_memory().unwrap();
    let mut db2 = SqlitePersistence::new_in_memory().unwrap();

    let project: Project = db1.create_project("Harbour").unwrap();

    assert!(db1.project_by_id(project.id).unwrap().is_some());
    assert!(
        db2.project_by_id(project.id).unwrap().is_none(),
        "db2 must not see db1's project"
    );
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parkstack.db");

    let project_id = {
        let mut db = SqlitePersistence::new_with_file(&path).unwrap();
        db.create_user("root", UserRole::Admin).unwrap();
        db.create_project("Harbour").unwrap().id
    };

    let mut reopened = SqlitePersistence::new_with_file(&path).unwrap();
    let project = reopened.project_by_id(project_id).unwrap().unwrap();
    assert_eq!(project.name, "Harbour");
    assert!(reopened.get_user_by_username("root").unwrap().is_some());
}

#[test]
fn test_migrations_revert_and_reapply() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence.create_project("Harbour").unwrap();

    persistence.conn.revert_all_migrations(MIGRATIONS).unwrap();
    let missing = cars::table
        .select(cars::car_id)
        .load::<i64>(&mut persistence.conn);
    assert!(missing.is_err(), "tables must be dropped by down.sql");

    persistence.conn.run_pending_migrations(MIGRATIONS).unwrap();
    let rows: Vec<i64> = cars::table
        .select(cars::car_id)
        .load(&mut persistence.conn)
        .unwrap();
    assert!(rows.is_empty());
    let user = persistence.create_user("u", UserRole::Customer).unwrap();
    assert!(persistence.create_car(user.id, "X", None).is_ok());
}
