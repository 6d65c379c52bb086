// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{
    CarId, CustomerId, OperatorId, ProjectId, RequestId, SlotId, StructureId, UserId,
};
use crate::party::ApprovalStatus;
use crate::request::RequestStatus;

/// Coarse classification of every domain failure.
///
/// Callers use this to pick a response class without matching on
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity is absent or outside the caller's scope.
    NotFound,
    /// The operation would break an invariant that already holds.
    Conflict,
    /// The input is structurally invalid.
    Validation,
    /// The requested status change is not permitted from the current status.
    StateTransition,
}

/// Errors that can occur during domain validation and rule enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A geometry field is missing, zero, or too large.
    InvalidGeometry {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Puzzle structures must declare their below-ground level count.
    MissingBelowGroundLevels,
    /// Tower structures have no below-ground levels.
    UnexpectedBelowGroundLevels,
    /// Inventory numbering must start at a positive integer.
    InvalidStartingNumber {
        /// The rejected value.
        value: i64,
    },
    /// The display number range would not fit the numbering space.
    DisplayNumberOverflow {
        /// The first display number.
        start: u32,
        /// The number of slots to label.
        count: u32,
    },
    /// A slot row carries both or neither of its level coordinates.
    InvalidSlotCoordinates {
        /// The above-ground level, if any.
        level: Option<u32>,
        /// The below-ground level, if any.
        below_ground_level: Option<u32>,
    },
    /// A slot's status disagrees with its car binding.
    InconsistentSlotBinding {
        /// The slot in question.
        slot_id: SlotId,
    },
    /// A name, username, or plate is empty or too long.
    InvalidName {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A structure kind string could not be parsed.
    InvalidStructureKind(String),
    /// A slot status string could not be parsed.
    InvalidSlotStatus(String),
    /// A request status string could not be parsed.
    InvalidRequestStatus(String),
    /// An approval status string could not be parsed.
    InvalidApprovalStatus(String),
    /// A user role string could not be parsed.
    InvalidUserRole(String),
    /// A profile scope names a structure outside the named project.
    ScopeStructureMismatch {
        /// The project named by the scope.
        project_id: ProjectId,
        /// The structure named by the scope.
        structure_id: StructureId,
    },
    /// Project does not exist.
    ProjectNotFound(ProjectId),
    /// Structure does not exist.
    StructureNotFound(StructureId),
    /// Slot does not exist.
    SlotNotFound(SlotId),
    /// User does not exist.
    UserNotFound(UserId),
    /// Customer profile does not exist.
    CustomerNotFound(CustomerId),
    /// The user has no customer profile.
    CustomerProfileNotFound {
        /// The user that was looked up.
        user_id: UserId,
    },
    /// The user has no operator profile.
    OperatorProfileNotFound {
        /// The user that was looked up.
        user_id: UserId,
    },
    /// Operator profile does not exist.
    OperatorNotFound(OperatorId),
    /// The car does not exist or is not owned by the user.
    CarNotFound {
        /// The car that was looked up.
        car_id: CarId,
        /// The user expected to own it.
        user_id: UserId,
    },
    /// The car is not owned by the customer's user.
    CarNotOwnedByCustomer {
        /// The car that was named.
        car_id: CarId,
        /// The customer it was supposed to belong to.
        customer_id: CustomerId,
    },
    /// The customer has no registered cars to fall back on.
    CustomerHasNoCars(CustomerId),
    /// No approved operator serves the customer's parking system.
    NoOperatorForScope {
        /// The customer's project.
        project_id: ProjectId,
        /// The customer's structure.
        structure_id: StructureId,
    },
    /// The request does not exist or belongs to another operator.
    RequestNotFound(RequestId),
    /// An actor attempted to act on a resource in another project.
    ScopeViolation {
        /// The project the actor is scoped to.
        actor_project: ProjectId,
        /// The project that owns the resource.
        resource_project: ProjectId,
    },
    /// The structure already has its inventory.
    InventoryAlreadyGenerated(StructureId),
    /// The slot is already bound to a car.
    SlotAlreadyAssigned(SlotId),
    /// The slot is not bound to any car.
    SlotNotAssigned(SlotId),
    /// The car already occupies another slot.
    CarAlreadyAssigned {
        /// The car in question.
        car_id: CarId,
        /// The slot it already occupies.
        slot_id: SlotId,
    },
    /// Only approved customers may be bound to a slot.
    CustomerNotApproved {
        /// The customer in question.
        customer_id: CustomerId,
        /// Its current approval status.
        status: ApprovalStatus,
    },
    /// A username is already taken.
    DuplicateUsername(String),
    /// The first administrator can only be created on an empty system.
    AlreadyBootstrapped,
    /// The request status change is not in the transition table.
    InvalidStatusTransition {
        /// The current status.
        from: RequestStatus,
        /// The requested status.
        to: RequestStatus,
    },
}

impl DomainError {
    /// Classifies this error into the failure taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGeometry { .. }
            | Self::MissingBelowGroundLevels
            | Self::UnexpectedBelowGroundLevels
            | Self::InvalidStartingNumber { .. }
            | Self::DisplayNumberOverflow { .. }
            | Self::InvalidSlotCoordinates { .. }
            | Self::InconsistentSlotBinding { .. }
            | Self::InvalidName { .. }
            | Self::InvalidStructureKind(_)
            | Self::InvalidSlotStatus(_)
            | Self::InvalidRequestStatus(_)
            | Self::InvalidApprovalStatus(_)
            | Self::InvalidUserRole(_)
            | Self::ScopeStructureMismatch { .. } => ErrorKind::Validation,
            Self::ProjectNotFound(_)
            | Self::StructureNotFound(_)
            | Self::SlotNotFound(_)
            | Self::UserNotFound(_)
            | Self::CustomerNotFound(_)
            | Self::CustomerProfileNotFound { .. }
            | Self::OperatorProfileNotFound { .. }
            | Self::OperatorNotFound(_)
            | Self::CarNotFound { .. }
            | Self::CarNotOwnedByCustomer { .. }
            | Self::CustomerHasNoCars(_)
            | Self::NoOperatorForScope { .. }
            | Self::RequestNotFound(_)
            | Self::ScopeViolation { .. } => ErrorKind::NotFound,
            Self::InventoryAlreadyGenerated(_)
            | Self::SlotAlreadyAssigned(_)
            | Self::SlotNotAssigned(_)
            | Self::CarAlreadyAssigned { .. }
            | Self::CustomerNotApproved { .. }
            | Self::DuplicateUsername(_)
            | Self::AlreadyBootstrapped => ErrorKind::Conflict,
            Self::InvalidStatusTransition { .. } => ErrorKind::StateTransition,
        }
    }
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGeometry { field, reason } => {
                write!(f, "Invalid geometry field '{field}': {reason}")
            }
            Self::MissingBelowGroundLevels => {
                write!(f, "Puzzle structures require levels_below_ground")
            }
            Self::UnexpectedBelowGroundLevels => {
                write!(f, "Tower structures do not have below-ground levels")
            }
            Self::InvalidStartingNumber { value } => {
                write!(
                    f,
                    "Invalid starting number: {value}. Must be a positive integer"
                )
            }
            Self::DisplayNumberOverflow { start, count } => {
                write!(
                    f,
                    "Display numbers starting at {start} cannot label {count} slots"
                )
            }
            Self::InvalidSlotCoordinates {
                level,
                below_ground_level,
            } => {
                write!(
                    f,
                    "Slot must have exactly one of level ({level:?}) and below-ground level ({below_ground_level:?})"
                )
            }
            Self::InconsistentSlotBinding { slot_id } => {
                write!(f, "Slot {slot_id} status does not match its car binding")
            }
            Self::InvalidName { field, reason } => write!(f, "Invalid {field}: {reason}"),
            Self::InvalidStructureKind(s) => write!(f, "Invalid structure kind: {s}"),
            Self::InvalidSlotStatus(s) => write!(f, "Invalid slot status: {s}"),
            Self::InvalidRequestStatus(s) => write!(f, "Invalid request status: {s}"),
            Self::InvalidApprovalStatus(s) => write!(f, "Invalid approval status: {s}"),
            Self::InvalidUserRole(s) => write!(f, "Invalid user role: {s}"),
            Self::ScopeStructureMismatch {
                project_id,
                structure_id,
            } => {
                write!(
                    f,
                    "Structure {structure_id} does not belong to project {project_id}"
                )
            }
            Self::ProjectNotFound(id) => write!(f, "Project {id} not found"),
            Self::StructureNotFound(id) => write!(f, "Structure {id} not found"),
            Self::SlotNotFound(id) => write!(f, "Slot {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::CustomerNotFound(id) => write!(f, "Customer {id} not found"),
            Self::CustomerProfileNotFound { user_id } => {
                write!(f, "No customer profile for user {user_id}")
            }
            Self::OperatorProfileNotFound { user_id } => {
                write!(f, "No operator profile for user {user_id}")
            }
            Self::OperatorNotFound(id) => write!(f, "Operator {id} not found"),
            Self::CarNotFound { car_id, user_id } => {
                write!(f, "Car {car_id} not found for user {user_id}")
            }
            Self::CarNotOwnedByCustomer {
                car_id,
                customer_id,
            } => {
                write!(f, "Car {car_id} does not belong to customer {customer_id}")
            }
            Self::CustomerHasNoCars(id) => write!(f, "Customer {id} has no cars"),
            Self::NoOperatorForScope { .. } => {
                write!(f, "No operator assigned to this parking system")
            }
            Self::RequestNotFound(id) => {
                write!(f, "Parking request {id} not found or not assigned to you")
            }
            Self::ScopeViolation {
                actor_project,
                resource_project,
            } => {
                write!(
                    f,
                    "Resource belongs to project {resource_project}, outside project {actor_project}"
                )
            }
            Self::InventoryAlreadyGenerated(id) => {
                write!(f, "Inventory already generated for structure {id}")
            }
            Self::SlotAlreadyAssigned(id) => {
                write!(f, "Slot {id} is already assigned to another customer")
            }
            Self::SlotNotAssigned(id) => write!(f, "Slot {id} is not assigned"),
            Self::CarAlreadyAssigned { car_id, slot_id } => {
                write!(f, "Car {car_id} is already assigned to slot {slot_id}")
            }
            Self::CustomerNotApproved {
                customer_id,
                status,
            } => {
                write!(
                    f,
                    "Customer {customer_id} is {status}; only approved customers can be assigned"
                )
            }
            Self::DuplicateUsername(name) => write!(f, "Username '{name}' is already taken"),
            Self::AlreadyBootstrapped => {
                write!(f, "System already has users; bootstrap is closed")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Invalid status transition from '{from}' to '{to}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
