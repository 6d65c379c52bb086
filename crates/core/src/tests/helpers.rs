// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ClaimOutcome, InventoryInsert, PartyDirectory, ReleaseOutcome, RequestStore, SlotStore,
    StoreError, StructureRepository, TransitionOutcome, generate_inventory,
};
use parkstack_domain::{
    ApprovalStatus, Car, CarId, Customer, CustomerId, Geometry, MotionProfile, NewSlot, Operator,
    OperatorId, ParkingRequest, Project, ProjectId, RequestId, RequestStatus, Scope, Slot,
    SlotBinding, SlotId, SlotStatus, Structure, StructureId, StructureKind, User, UserId,
    UserRole,
};
use time::{Duration, OffsetDateTime};

/// In-memory implementation of every store trait.
///
/// Each method runs to completion on `&mut self`, so the conditional
/// updates are trivially atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    clock: i64,
    next_id: i64,
    pub projects: Vec<Project>,
    pub structures: Vec<Structure>,
    pub slots: Vec<Slot>,
    pub users: Vec<User>,
    pub cars: Vec<Car>,
    pub customers: Vec<Customer>,
    pub operators: Vec<Operator>,
    pub requests: Vec<ParkingRequest>,
}

impl MemoryStore {
    fn tick(&mut self) -> OffsetDateTime {
        self.clock += 1;
        OffsetDateTime::UNIX_EPOCH + Duration::seconds(self.clock)
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_project(&mut self, name: &str) -> ProjectId {
        let id = ProjectId::new(self.allocate_id());
        let created_at = self.tick();
        self.projects.push(Project {
            id,
            name: name.to_string(),
            created_at,
        });
        id
    }

    pub fn add_structure(
        &mut self,
        project_id: ProjectId,
        kind: StructureKind,
        levels: u32,
        columns: u32,
        below: Option<u32>,
    ) -> StructureId {
        let geometry = Geometry::new(kind, levels, columns, below).unwrap();
        self.insert_structure(project_id, "Test Structure", &geometry, &MotionProfile::default())
            .unwrap()
            .id
    }

    pub fn add_user(&mut self, username: &str, role: UserRole) -> UserId {
        let id = UserId::new(self.allocate_id());
        let created_at = self.tick();
        self.users.push(User {
            id,
            username: username.to_string(),
            role,
            created_at,
        });
        id
    }

    pub fn add_car(&mut self, owner: UserId, plate: &str) -> CarId {
        let id = CarId::new(self.allocate_id());
        let created_at = self.tick();
        self.cars.push(Car {
            id,
            owner_user_id: owner,
            plate: plate.to_string(),
            model: None,
            created_at,
        });
        id
    }

    pub fn add_customer(
        &mut self,
        user_id: UserId,
        scope: Scope,
        status: ApprovalStatus,
    ) -> CustomerId {
        let id = CustomerId::new(self.allocate_id());
        let created_at = self.tick();
        self.customers.push(Customer {
            id,
            user_id,
            scope,
            status,
            created_at,
        });
        id
    }

    pub fn add_operator(
        &mut self,
        user_id: UserId,
        scope: Scope,
        status: ApprovalStatus,
    ) -> OperatorId {
        let id = OperatorId::new(self.allocate_id());
        let created_at = self.tick();
        self.operators.push(Operator {
            id,
            user_id,
            scope,
            status,
            created_at,
        });
        id
    }

    pub fn slot(&self, slot_id: SlotId) -> &Slot {
        self.slots.iter().find(|s| s.id == slot_id).unwrap()
    }

    pub fn assigned_slots_for(&self, car_id: CarId) -> usize {
        self.slots
            .iter()
            .filter(|s| s.binding == SlotBinding::Assigned(car_id))
            .count()
    }

    pub fn request(&self, request_id: RequestId) -> &ParkingRequest {
        self.requests.iter().find(|r| r.id == request_id).unwrap()
    }
}

impl StructureRepository for MemoryStore {
    fn project_by_id(&mut self, project_id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.iter().find(|p| p.id == project_id).cloned())
    }

    fn structure_by_id(
        &mut self,
        structure_id: StructureId,
    ) -> Result<Option<Structure>, StoreError> {
        Ok(self
            .structures
            .iter()
            .find(|s| s.id == structure_id)
            .cloned())
    }

    fn insert_structure(
        &mut self,
        project_id: ProjectId,
        name: &str,
        geometry: &Geometry,
        motion: &MotionProfile,
    ) -> Result<Structure, StoreError> {
        let structure = Structure {
            id: StructureId::new(self.allocate_id()),
            project_id,
            name: name.to_string(),
            geometry: *geometry,
            total_slots: None,
            motion: *motion,
            created_at: self.tick(),
        };
        self.structures.push(structure.clone());
        Ok(structure)
    }
}

impl SlotStore for MemoryStore {
    fn insert_inventory(
        &mut self,
        structure_id: StructureId,
        total_slots: u32,
        slots: &[NewSlot],
    ) -> Result<InventoryInsert, StoreError> {
        if self.slots.iter().any(|s| s.structure_id == structure_id) {
            return Ok(InventoryInsert::AlreadyGenerated);
        }

        let now = self.tick();
        let mut created = Vec::with_capacity(slots.len());
        for new_slot in slots {
            let slot = Slot {
                id: SlotId::new(self.allocate_id()),
                structure_id,
                position: new_slot.position,
                display_number: new_slot.display_number,
                binding: SlotBinding::Released,
                updated_at: now,
            };
            created.push(slot.clone());
            self.slots.push(slot);
        }

        if let Some(structure) = self.structures.iter_mut().find(|s| s.id == structure_id) {
            structure.total_slots.get_or_insert(total_slots);
        }

        Ok(InventoryInsert::Inserted(created))
    }

    fn slot_by_id(&mut self, slot_id: SlotId) -> Result<Option<Slot>, StoreError> {
        Ok(self.slots.iter().find(|s| s.id == slot_id).cloned())
    }

    fn list_by_structure(&mut self, structure_id: StructureId) -> Result<Vec<Slot>, StoreError> {
        let mut slots: Vec<Slot> = self
            .slots
            .iter()
            .filter(|s| s.structure_id == structure_id)
            .cloned()
            .collect();
        slots.sort_by(|a, b| a.position.listing_cmp(&b.position));
        Ok(slots)
    }

    fn assigned_slot_for_car(&mut self, car_id: CarId) -> Result<Option<Slot>, StoreError> {
        Ok(self
            .slots
            .iter()
            .find(|s| s.binding == SlotBinding::Assigned(car_id))
            .cloned())
    }

    fn claim(&mut self, slot_id: SlotId, car_id: CarId) -> Result<ClaimOutcome, StoreError> {
        if let Some(bound) = self
            .slots
            .iter()
            .find(|s| s.binding == SlotBinding::Assigned(car_id))
        {
            return Ok(ClaimOutcome::CarAlreadyBound { slot_id: bound.id });
        }

        let now = self.tick();
        let Some(slot) = self.slots.iter_mut().find(|s| s.id == slot_id) else {
            return Ok(ClaimOutcome::SlotMissing);
        };
        if slot.status() != SlotStatus::Released {
            return Ok(ClaimOutcome::SlotNotReleased);
        }

        slot.binding = SlotBinding::Assigned(car_id);
        slot.updated_at = now;
        Ok(ClaimOutcome::Claimed(slot.clone()))
    }

    fn release(&mut self, slot_id: SlotId) -> Result<ReleaseOutcome, StoreError> {
        let now = self.tick();
        let Some(slot) = self.slots.iter_mut().find(|s| s.id == slot_id) else {
            return Ok(ReleaseOutcome::SlotMissing);
        };
        let SlotBinding::Assigned(car_id) = slot.binding else {
            return Ok(ReleaseOutcome::SlotNotAssigned);
        };

        slot.binding = SlotBinding::Released;
        slot.updated_at = now;
        Ok(ReleaseOutcome::Released {
            slot: slot.clone(),
            car_id,
        })
    }
}

impl PartyDirectory for MemoryStore {
    fn user_by_id(&mut self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    fn car_by_id(&mut self, car_id: CarId) -> Result<Option<Car>, StoreError> {
        Ok(self.cars.iter().find(|c| c.id == car_id).cloned())
    }

    fn earliest_car_for_user(&mut self, user_id: UserId) -> Result<Option<Car>, StoreError> {
        Ok(self
            .cars
            .iter()
            .filter(|c| c.owner_user_id == user_id)
            .min_by_key(|c| (c.created_at, c.id))
            .cloned())
    }

    fn customer_by_id(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.iter().find(|c| c.id == customer_id).cloned())
    }

    fn customer_by_user(&mut self, user_id: UserId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.iter().find(|c| c.user_id == user_id).cloned())
    }

    fn operator_by_user(&mut self, user_id: UserId) -> Result<Option<Operator>, StoreError> {
        Ok(self.operators.iter().find(|o| o.user_id == user_id).cloned())
    }

    fn approved_operator_for_scope(
        &mut self,
        scope: Scope,
    ) -> Result<Option<Operator>, StoreError> {
        Ok(self
            .operators
            .iter()
            .filter(|o| o.scope == scope && o.status == ApprovalStatus::Approved)
            .min_by_key(|o| o.id)
            .cloned())
    }
}

impl RequestStore for MemoryStore {
    fn insert_request(
        &mut self,
        user_id: UserId,
        operator_id: OperatorId,
        car_id: CarId,
    ) -> Result<ParkingRequest, StoreError> {
        let now = self.tick();
        let request = ParkingRequest {
            id: RequestId::new(self.allocate_id()),
            user_id,
            operator_id,
            car_id,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.requests.push(request.clone());
        Ok(request)
    }

    fn requests_for_operator(
        &mut self,
        operator_id: OperatorId,
    ) -> Result<Vec<ParkingRequest>, StoreError> {
        let mut requests: Vec<ParkingRequest> = self
            .requests
            .iter()
            .filter(|r| r.operator_id == operator_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(requests)
    }

    fn requests_for_user(&mut self, user_id: UserId) -> Result<Vec<ParkingRequest>, StoreError> {
        let mut requests: Vec<ParkingRequest> = self
            .requests
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(requests)
    }

    fn transition_request(
        &mut self,
        request_id: RequestId,
        operator_id: OperatorId,
        allowed_from: &[RequestStatus],
        to: RequestStatus,
    ) -> Result<TransitionOutcome, StoreError> {
        let now = self.tick();
        let Some(request) = self
            .requests
            .iter_mut()
            .find(|r| r.id == request_id && r.operator_id == operator_id)
        else {
            return Ok(TransitionOutcome::NotFound);
        };

        if !allowed_from.contains(&request.status) {
            return Ok(TransitionOutcome::Rejected {
                current: request.status,
            });
        }

        request.status = to;
        request.updated_at = now;
        Ok(TransitionOutcome::Updated(request.clone()))
    }
}

/// A project with one generated 3x2 Tower, an approved operator, and an
/// approved customer owning one car.
pub struct Fixture {
    pub store: MemoryStore,
    pub project: ProjectId,
    pub structure: StructureId,
    pub scope: Scope,
    pub operator_user: UserId,
    pub operator: OperatorId,
    pub customer_user: UserId,
    pub customer: CustomerId,
    pub car: CarId,
}

impl Fixture {
    /// The generated slots in display number order.
    pub fn slot_ids(&self) -> Vec<SlotId> {
        let mut slots: Vec<&Slot> = self
            .store
            .slots
            .iter()
            .filter(|s| s.structure_id == self.structure)
            .collect();
        slots.sort_by_key(|s| s.display_number);
        slots.iter().map(|s| s.id).collect()
    }

    /// Adds another approved customer with one car in the fixture's scope.
    pub fn add_customer(&mut self, username: &str, plate: &str) -> (UserId, CustomerId, CarId) {
        let user = self.store.add_user(username, UserRole::Customer);
        let car = self.store.add_car(user, plate);
        let customer = self
            .store
            .add_customer(user, self.scope, ApprovalStatus::Approved);
        (user, customer, car)
    }
}

pub fn create_fixture() -> Fixture {
    let mut store = MemoryStore::default();
    let project = store.add_project("Harbour");
    let structure = store.add_structure(project, StructureKind::Tower, 3, 2, None);
    generate_inventory(&mut store, structure, 1).unwrap();

    let scope = Scope {
        project_id: project,
        structure_id: structure,
    };

    let operator_user = store.add_user("olivia", UserRole::Operator);
    let operator = store.add_operator(operator_user, scope, ApprovalStatus::Approved);

    let customer_user = store.add_user("carl", UserRole::Customer);
    let car = store.add_car(customer_user, "ABC-123");
    let customer = store.add_customer(customer_user, scope, ApprovalStatus::Approved);

    Fixture {
        store,
        project,
        structure,
        scope,
        operator_user,
        operator,
        customer_user,
        customer,
        car,
    }
}
