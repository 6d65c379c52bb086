// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkstack::{StructureDefinition, define_structure, generate_inventory};
use parkstack_domain::{
    ApprovalStatus, CarId, CustomerId, MotionProfile, OperatorId, ProjectId, Scope, SlotId,
    StructureId, StructureKind, UserId, UserRole,
};

use crate::SqlitePersistence;

/// A project with one generated 3x2 tower, an approved operator, and an
/// approved customer with one car.
pub struct Seeded {
    pub db: SqlitePersistence,
    pub project: ProjectId,
    pub structure: StructureId,
    pub scope: Scope,
    pub operator_user: UserId,
    pub operator: OperatorId,
    pub customer_user: UserId,
    pub customer: CustomerId,
    pub car: CarId,
    pub slots: Vec<SlotId>,
}

impl Seeded {
    /// Adds an approved customer in the seeded scope with one car.
    pub fn add_customer(&mut self, username: &str, plate: &str) -> (UserId, CustomerId, CarId) {
        add_customer(&mut self.db, self.scope, username, plate)
    }
}

pub fn add_structure(
    db: &mut SqlitePersistence,
    project: ProjectId,
    kind: StructureKind,
    levels: u32,
    columns: u32,
    below: Option<u32>,
) -> StructureId {
    define_structure(
        db,
        &StructureDefinition {
            project_id: project,
            name: format!("{kind} {levels}x{columns}"),
            kind,
            levels_above_ground: levels,
            columns,
            levels_below_ground: below,
            motion: MotionProfile::default(),
        },
    )
    .unwrap()
    .id
}

pub fn add_customer(
    db: &mut SqlitePersistence,
    scope: Scope,
    username: &str,
    plate: &str,
) -> (UserId, CustomerId, CarId) {
    let user = db.create_user(username, UserRole::Customer).unwrap().id;
    let car = db.create_car(user, plate, None).unwrap().id;
    let customer = db.create_customer(user, scope).unwrap().id;
    db.set_customer_status(customer, ApprovalStatus::Approved)
        .unwrap()
        .unwrap();
    (user, customer, car)
}

pub fn add_operator(db: &mut SqlitePersistence, scope: Scope, username: &str) -> (UserId, OperatorId) {
    let user = db.create_user(username, UserRole::Operator).unwrap().id;
    let operator = db.create_operator(user, scope).unwrap().id;
    db.set_operator_status(operator, ApprovalStatus::Approved)
        .unwrap()
        .unwrap();
    (user, operator)
}

pub fn seed_into(mut db: SqlitePersistence) -> Seeded {
    let project = db.create_project("Harbour").unwrap().id;
    let structure = add_structure(&mut db, project, StructureKind::Tower, 3, 2, None);
    let inventory = generate_inventory(&mut db, structure, 1).unwrap();
    let scope = Scope {
        project_id: project,
        structure_id: structure,
    };
    let (operator_user, operator) = add_operator(&mut db, scope, "olivia");
    let (customer_user, customer, car) = add_customer(&mut db, scope, "carl", "ABC-123");

    Seeded {
        db,
        project,
        structure,
        scope,
        operator_user,
        operator,
        customer_user,
        customer,
        car,
        slots: inventory.slots.iter().map(|s| s.id).collect(),
    }
}

pub fn seed() -> Seeded {
    seed_into(SqlitePersistence::new_in_memory().unwrap())
}
