// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Narrow lookup and mutation interfaces the engine depends on.
//!
//! Each operation in this crate names only the traits it calls. Lookups
//! return `Ok(None)` for an absent entity and reserve `Err` for a store
//! that could not answer at all.
//!
//! The mutating methods on [`SlotStore`] and [`RequestStore`] are the only
//! writers of slot bindings and request status. Implementations must make
//! each of them a single atomic step: the outcome enums report which guard
//! failed so the engine never has to re-check and retry.

use parkstack_domain::{
    Car, CarId, Customer, CustomerId, Geometry, MotionProfile, NewSlot, Operator, OperatorId,
    ParkingRequest, Project, ProjectId, RequestId, RequestStatus, Scope, Slot, SlotId, Structure,
    StructureId, User, UserId,
};

/// A failure of the backing store itself (connection, I/O, corruption).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Store failure: {}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Projects and structures.
pub trait StructureRepository {
    /// Looks up a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn project_by_id(&mut self, project_id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// Looks up a structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn structure_by_id(
        &mut self,
        structure_id: StructureId,
    ) -> Result<Option<Structure>, StoreError>;

    /// Persists a new structure with no inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn insert_structure(
        &mut self,
        project_id: ProjectId,
        name: &str,
        geometry: &Geometry,
        motion: &MotionProfile,
    ) -> Result<Structure, StoreError>;
}

/// Result of a one-time inventory insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryInsert {
    /// Every slot was inserted, in the order given.
    Inserted(Vec<Slot>),
    /// The structure already had an inventory; nothing was written.
    AlreadyGenerated,
}

/// Result of a conditional `released -> assigned` update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The slot is now bound to the car.
    Claimed(Slot),
    /// No slot has this id.
    SlotMissing,
    /// The slot was not released.
    SlotNotReleased,
    /// The car is already bound to another assigned slot.
    CarAlreadyBound {
        /// The slot the car occupies.
        slot_id: SlotId,
    },
}

/// Result of a conditional `assigned -> released` update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The slot is released. `car_id` is the car that was bound to it.
    Released {
        /// The slot after release.
        slot: Slot,
        /// The car that occupied it.
        car_id: CarId,
    },
    /// No slot has this id.
    SlotMissing,
    /// The slot was not assigned.
    SlotNotAssigned,
}

/// Pallet slots and their atomic claim/release.
pub trait SlotStore {
    /// Inserts the whole inventory of a structure and records its slot count.
    ///
    /// Must be all-or-nothing, and must return
    /// [`InventoryInsert::AlreadyGenerated`] rather than insert a second
    /// inventory even under concurrent callers.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn insert_inventory(
        &mut self,
        structure_id: StructureId,
        total_slots: u32,
        slots: &[NewSlot],
    ) -> Result<InventoryInsert, StoreError>;

    /// Looks up a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn slot_by_id(&mut self, slot_id: SlotId) -> Result<Option<Slot>, StoreError>;

    /// Lists a structure's slots ordered by level (nulls last), below-ground
    /// level (nulls last), then column.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_by_structure(&mut self, structure_id: StructureId) -> Result<Vec<Slot>, StoreError>;

    /// Returns the assigned slot currently holding `car_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn assigned_slot_for_car(&mut self, car_id: CarId) -> Result<Option<Slot>, StoreError>;

    /// Binds `car_id` to `slot_id` iff the slot is released and the car
    /// holds no other assigned slot, as one atomic step.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn claim(&mut self, slot_id: SlotId, car_id: CarId) -> Result<ClaimOutcome, StoreError>;

    /// Clears the binding of `slot_id` iff it is assigned, as one atomic step.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn release(&mut self, slot_id: SlotId) -> Result<ReleaseOutcome, StoreError>;
}

/// Users, cars, and customer/operator profiles.
pub trait PartyDirectory {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn user_by_id(&mut self, user_id: UserId) -> Result<Option<User>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn car_by_id(&mut self, car_id: CarId) -> Result<Option<Car>, StoreError>;

    /// Returns the user's earliest registered car.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn earliest_car_for_user(&mut self, user_id: UserId) -> Result<Option<Car>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn customer_by_id(&mut self, customer_id: CustomerId)
    -> Result<Option<Customer>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn customer_by_user(&mut self, user_id: UserId) -> Result<Option<Customer>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn operator_by_user(&mut self, user_id: UserId) -> Result<Option<Operator>, StoreError>;

    /// Returns the approved operator serving `scope`.
    ///
    /// When several match, the earliest created (lowest id) is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn approved_operator_for_scope(&mut self, scope: Scope)
    -> Result<Option<Operator>, StoreError>;
}

/// Result of a conditional request status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The request moved to the new status.
    Updated(ParkingRequest),
    /// No request with this id is routed to this operator.
    NotFound,
    /// The request exists but its current status is not an allowed source.
    Rejected {
        /// The status observed when the update was refused.
        current: RequestStatus,
    },
}

/// Parking requests.
pub trait RequestStore {
    /// Inserts a new `pending` request.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn insert_request(
        &mut self,
        user_id: UserId,
        operator_id: OperatorId,
        car_id: CarId,
    ) -> Result<ParkingRequest, StoreError>;

    /// Requests routed to an operator, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn requests_for_operator(
        &mut self,
        operator_id: OperatorId,
    ) -> Result<Vec<ParkingRequest>, StoreError>;

    /// Requests submitted by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn requests_for_user(&mut self, user_id: UserId) -> Result<Vec<ParkingRequest>, StoreError>;

    /// Sets the status of `request_id` to `to` iff it is routed to
    /// `operator_id` and its current status is in `allowed_from`, as one
    /// atomic step.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn transition_request(
        &mut self,
        request_id: RequestId,
        operator_id: OperatorId,
        allowed_from: &[RequestStatus],
        to: RequestStatus,
    ) -> Result<TransitionOutcome, StoreError>;
}
