// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary for the parkstack engine.
//!
//! Handlers take plain request DTOs, resolve and authorize the acting user,
//! run the engine against [`parkstack_persistence::SqlitePersistence`] and
//! return response DTOs together with the notifications to deliver.

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, InputError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    ApiResult, assign_slot, bootstrap_admin, create_customer, create_operator,
    create_parking_request, create_project, define_structure, generate_inventory,
    list_my_requests, list_operator_requests, list_structure_slots, register_car,
    register_user, release_slot, set_customer_status, set_operator_status,
    update_request_status,
};
pub use request_response::{
    ActorRequest, AssignSlotRequest, BootstrapAdminRequest, CarResponse, CreateParkingRequest,
    CreateParkingResponse, CreateProfileRequest, CreateProjectRequest, CustomerResponse,
    DefineStructureRequest, GenerateInventoryRequest, GenerateInventoryResponse,
    ListParkingRequestsResponse, OperatorResponse, ParkingRequestResponse, ProjectResponse,
    RegisterCarRequest, RegisterUserRequest, SetApprovalStatusRequest, SlotDetailResponse,
    SlotGroupInfo, SlotInfo, SlotListingInfo, StructureInfo, StructureResponse,
    StructureSlotsResponse, UpdateRequestStatusRequest, UserResponse,
};
