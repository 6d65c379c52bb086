// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use parkstack_domain::{ApprovalStatus, RequestStatus, StructureKind, UserRole};
use parkstack_persistence::SqlitePersistence;

use crate::{
    ApiError, ApiResult, AssignSlotRequest, CreateParkingRequest, ParkingRequestResponse,
    SlotDetailResponse, UpdateRequestStatusRequest, assign_slot, create_parking_request,
    update_request_status,
};
use crate::{
    BootstrapAdminRequest, CreateProfileRequest, CreateProjectRequest, DefineStructureRequest,
    GenerateInventoryRequest, RegisterCarRequest, RegisterUserRequest, SetApprovalStatusRequest,
    bootstrap_admin, create_customer, create_operator, create_project, define_structure,
    generate_inventory, register_car, register_user, set_customer_status, set_operator_status,
};

/// Ids of everything the seeded world contains.
///
/// One project with a generated 3x2 tower numbered from 1, an approved
/// operator, and an approved customer with one car.
pub struct World {
    pub db: SqlitePersistence,
    pub admin: i64,
    pub project: i64,
    pub structure: i64,
    pub slots: Vec<i64>,
    pub operator_user: i64,
    pub operator: i64,
    pub customer_user: i64,
    pub customer: i64,
    pub car: i64,
}

impl World {
    /// Assigns `slot` as the seeded operator.
    pub fn assign(
        &mut self,
        slot: i64,
        customer: i64,
        car: Option<i64>,
    ) -> Result<ApiResult<SlotDetailResponse>, ApiError> {
        assign_slot(
            &mut self.db,
            slot,
            &AssignSlotRequest {
                actor_user_id: self.operator_user,
                customer_id: customer,
                car_id: car,
            },
        )
    }

    /// Raises a request for `car` as the seeded customer and returns its id.
    pub fn raise(&mut self, car: i64) -> i64 {
        create_parking_request(
            &mut self.db,
            &CreateParkingRequest {
                actor_user_id: self.customer_user,
                car_id: car,
            },
        )
        .unwrap()
        .response
        .request
        .id
        .value()
    }

    /// Moves `request` along as the seeded operator.
    pub fn update(
        &mut self,
        request: i64,
        status: RequestStatus,
    ) -> Result<ApiResult<ParkingRequestResponse>, ApiError> {
        update_request_status(
            &mut self.db,
            request,
            &UpdateRequestStatusRequest {
                actor_user_id: self.operator_user,
                status,
            },
        )
    }

    /// Registers a user and returns its id.
    pub fn add_user(&mut self, username: &str, role: UserRole) -> i64 {
        add_user(&mut self.db, self.admin, username, role)
    }

    /// Adds an approved customer in `project`/`structure` with one car.
    ///
    /// Returns `(user_id, customer_id, car_id)`.
    pub fn add_customer_in(
        &mut self,
        project: i64,
        structure: i64,
        username: &str,
        plate: &str,
    ) -> (i64, i64, i64) {
        let user = self.add_user(username, UserRole::Customer);
        let car = self.add_car(user, plate);
        let customer = create_customer(
            &mut self.db,
            &CreateProfileRequest {
                actor_user_id: self.admin,
                user_id: user,
                project_id: project,
                structure_id: structure,
            },
        )
        .unwrap()
        .response
        .customer
        .id
        .value();
        set_customer_status(
            &mut self.db,
            customer,
            &SetApprovalStatusRequest {
                actor_user_id: self.admin,
                status: ApprovalStatus::Approved,
            },
        )
        .unwrap();
        (user, customer, car)
    }

    /// Adds an approved customer in the seeded scope.
    pub fn add_customer(&mut self, username: &str, plate: &str) -> (i64, i64, i64) {
        self.add_customer_in(self.project, self.structure, username, plate)
    }

    /// Adds an approved operator in `project`/`structure`.
    ///
    /// Returns `(user_id, operator_id)`.
    pub fn add_operator_in(&mut self, project: i64, structure: i64, username: &str) -> (i64, i64) {
        let user = self.add_user(username, UserRole::Operator);
        let operator = create_operator(
            &mut self.db,
            &CreateProfileRequest {
                actor_user_id: self.admin,
                user_id: user,
                project_id: project,
                structure_id: structure,
            },
        )
        .unwrap()
        .response
        .operator
        .id
        .value();
        set_operator_status(
            &mut self.db,
            operator,
            &SetApprovalStatusRequest {
                actor_user_id: self.admin,
                status: ApprovalStatus::Approved,
            },
        )
        .unwrap();
        (user, operator)
    }

    pub fn add_car(&mut self, owner: i64, plate: &str) -> i64 {
        register_car(
            &mut self.db,
            &RegisterCarRequest {
                actor_user_id: self.admin,
                owner_user_id: owner,
                plate: plate.to_string(),
                model: None,
            },
        )
        .unwrap()
        .response
        .car
        .id
        .value()
    }

    pub fn add_project(&mut self, name: &str) -> i64 {
        create_project(
            &mut self.db,
            &CreateProjectRequest {
                actor_user_id: self.admin,
                name: name.to_string(),
            },
        )
        .unwrap()
        .response
        .project
        .id
        .value()
    }

    pub fn add_tower(&mut self, project: i64, levels: u32, columns: u32) -> i64 {
        define_structure(
            &mut self.db,
            &tower_request(self.admin, project, levels, columns),
        )
        .unwrap()
        .response
        .structure
        .structure_id
    }
}

pub fn add_user(db: &mut SqlitePersistence, admin: i64, username: &str, role: UserRole) -> i64 {
    register_user(
        db,
        &RegisterUserRequest {
            actor_user_id: admin,
            username: username.to_string(),
            role,
        },
    )
    .unwrap()
    .response
    .user
    .id
    .value()
}

pub fn tower_request(actor: i64, project: i64, levels: u32, columns: u32) -> DefineStructureRequest {
    DefineStructureRequest {
        actor_user_id: actor,
        project_id: project,
        name: format!("Tower {levels}x{columns}"),
        kind: StructureKind::Tower,
        levels_above_ground: levels,
        columns,
        levels_below_ground: None,
        motion: None,
    }
}

/// An empty database with only the bootstrapped admin.
pub fn admin_only() -> (SqlitePersistence, i64) {
    let mut db = SqlitePersistence::new_in_memory().unwrap();
    let admin = bootstrap_admin(
        &mut db,
        &BootstrapAdminRequest {
            username: String::from("root"),
        },
    )
    .unwrap()
    .response
    .user
    .id
    .value();
    (db, admin)
}

pub fn seed() -> World {
    let (db, admin) = admin_only();
    let mut world = World {
        db,
        admin,
        project: 0,
        structure: 0,
        slots: Vec::new(),
        operator_user: 0,
        operator: 0,
        customer_user: 0,
        customer: 0,
        car: 0,
    };

    world.project = world.add_project("Harbour");
    world.structure = world.add_tower(world.project, 3, 2);
    world.slots = generate_inventory(
        &mut world.db,
        world.structure,
        &GenerateInventoryRequest {
            actor_user_id: admin,
            starting_number: 1,
        },
    )
    .unwrap()
    .response
    .slots
    .iter()
    .map(|s| s.slot_id)
    .collect();

    let (operator_user, operator) = world.add_operator_in(world.project, world.structure, "olivia");
    world.operator_user = operator_user;
    world.operator = operator;

    let (customer_user, customer, car) = world.add_customer("carl", "ABC-123");
    world.customer_user = customer_user;
    world.customer = customer;
    world.car = car;

    world
}
