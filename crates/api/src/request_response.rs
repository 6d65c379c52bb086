// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Every request except the bootstrap names the acting user in
//! `actor_user_id`. Path identifiers are passed to handlers separately.

use parkstack::{SlotDetail, SlotListing};
use parkstack_domain::{
    ApprovalStatus, Car, CarId, Customer, MotionProfile, Operator, ParkingRequest, Project,
    RequestStatus, Slot, SlotStatus, Structure, StructureKind, User, UserRole,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// ============================================================================
// Provisioning
// ============================================================================

/// API request to create the first administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapAdminRequest {
    pub username: String,
}

/// API request to create a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub actor_user_id: i64,
    pub name: String,
}

/// API response for a created project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub project: Project,
    pub message: String,
}

/// API request to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub actor_user_id: i64,
    pub username: String,
    pub role: UserRole,
}

/// API response for a created user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
    pub message: String,
}

/// API request to register a car for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCarRequest {
    pub actor_user_id: i64,
    pub owner_user_id: i64,
    /// Normalized to upper case.
    pub plate: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// API response for a registered car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarResponse {
    pub car: Car,
    pub message: String,
}

/// API request to create a customer or operator profile.
///
/// The structure must belong to the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub actor_user_id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub structure_id: i64,
}

/// API request to approve, reject, or reset a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetApprovalStatusRequest {
    pub actor_user_id: i64,
    pub status: ApprovalStatus,
}

/// API response carrying a customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub customer: Customer,
    pub message: String,
}

/// API response carrying an operator profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorResponse {
    pub operator: Operator,
    pub message: String,
}

// ============================================================================
// Structures and inventory
// ============================================================================

/// API request to define a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineStructureRequest {
    pub actor_user_id: i64,
    pub project_id: i64,
    pub name: String,
    pub kind: StructureKind,
    pub levels_above_ground: u32,
    pub columns: u32,
    /// Required for puzzle structures, rejected for towers.
    #[serde(default)]
    pub levels_below_ground: Option<u32>,
    #[serde(default)]
    pub motion: Option<MotionProfile>,
}

/// Public view of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureInfo {
    pub structure_id: i64,
    pub project_id: i64,
    pub name: String,
    pub kind: StructureKind,
    pub levels_above_ground: u32,
    pub columns: u32,
    pub levels_below_ground: Option<u32>,
    /// `None` until the inventory is generated.
    pub total_slots: Option<u32>,
    pub motion: MotionProfile,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Structure> for StructureInfo {
    fn from(structure: &Structure) -> Self {
        Self {
            structure_id: structure.id.value(),
            project_id: structure.project_id.value(),
            name: structure.name.clone(),
            kind: structure.geometry.kind(),
            levels_above_ground: structure.geometry.levels_above_ground(),
            columns: structure.geometry.columns(),
            levels_below_ground: structure.geometry.levels_below_ground(),
            total_slots: structure.total_slots,
            motion: structure.motion,
            created_at: structure.created_at,
        }
    }
}

/// API response for a defined structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureResponse {
    pub structure: StructureInfo,
    pub message: String,
}

/// API request to generate a structure's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateInventoryRequest {
    pub actor_user_id: i64,
    /// Must be positive.
    pub starting_number: i64,
}

/// Public view of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub slot_id: i64,
    pub structure_id: i64,
    pub display_number: u32,
    pub level: Option<u32>,
    pub below_ground_level: Option<u32>,
    pub column: u32,
    pub status: SlotStatus,
    pub car_id: Option<i64>,
}

impl From<&Slot> for SlotInfo {
    fn from(slot: &Slot) -> Self {
        Self {
            slot_id: slot.id.value(),
            structure_id: slot.structure_id.value(),
            display_number: slot.display_number,
            level: slot.position.level(),
            below_ground_level: slot.position.below_ground_level(),
            column: slot.position.column(),
            status: slot.status(),
            car_id: slot.car_id().map(CarId::value),
        }
    }
}

/// API response for a generated inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateInventoryResponse {
    pub structure_id: i64,
    pub slots: Vec<SlotInfo>,
    pub total_created: u32,
    pub starting_number: u32,
    pub ending_number: u32,
    pub message: String,
}

/// A slot with its occupant, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotListingInfo {
    pub slot: SlotInfo,
    pub car: Option<Car>,
    pub customer: Option<Customer>,
}

impl From<&SlotListing> for SlotListingInfo {
    fn from(listing: &SlotListing) -> Self {
        Self {
            slot: SlotInfo::from(&listing.slot),
            car: listing.occupant.as_ref().map(|o| o.car.clone()),
            customer: listing.occupant.as_ref().and_then(|o| o.customer.clone()),
        }
    }
}

/// Slots sharing one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGroupInfo {
    /// `L1`, `L2`, ... then `B1`, `B2`, ...
    pub label: String,
    pub slots: Vec<SlotListingInfo>,
}

/// API response listing a structure's slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSlotsResponse {
    pub structure: StructureInfo,
    pub project: Project,
    pub groups: Vec<SlotGroupInfo>,
}

// ============================================================================
// Allocation
// ============================================================================

/// API request to bind a slot to a customer's car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignSlotRequest {
    pub actor_user_id: i64,
    pub customer_id: i64,
    /// Defaults to the customer's earliest registered car.
    #[serde(default)]
    pub car_id: Option<i64>,
}

/// API request naming only the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRequest {
    pub actor_user_id: i64,
}

/// API response for an assigned or released slot.
///
/// After a release, `car` and `customer` describe the occupant that left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDetailResponse {
    pub slot: SlotInfo,
    pub structure: StructureInfo,
    pub project: Project,
    pub car: Option<Car>,
    pub customer: Option<Customer>,
    pub message: String,
}

impl SlotDetailResponse {
    pub(crate) fn from_detail(detail: &SlotDetail, message: String) -> Self {
        Self {
            slot: SlotInfo::from(&detail.slot),
            structure: StructureInfo::from(&detail.structure),
            project: detail.project.clone(),
            car: detail.occupant.as_ref().map(|o| o.car.clone()),
            customer: detail.occupant.as_ref().and_then(|o| o.customer.clone()),
            message,
        }
    }
}

// ============================================================================
// Parking requests
// ============================================================================

/// API request to raise a parking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateParkingRequest {
    pub actor_user_id: i64,
    pub car_id: i64,
}

/// API response for a created parking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateParkingResponse {
    pub request: ParkingRequest,
    /// The operator the request was routed to.
    pub operator: Operator,
    pub message: String,
}

/// API request to move a parking request along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequestStatusRequest {
    pub actor_user_id: i64,
    pub status: RequestStatus,
}

/// API response carrying one parking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingRequestResponse {
    pub request: ParkingRequest,
    pub message: String,
}

/// API response listing parking requests, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParkingRequestsResponse {
    pub requests: Vec<ParkingRequest>,
}
