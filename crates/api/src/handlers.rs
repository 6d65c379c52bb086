// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler resolves the acting user, checks its role, runs the engine
//! operation against persistence and translates any failure. State-changing
//! handlers also return the notifications the change produced.

use parkstack::{
    CoreError, CreatedRequest, GeneratedInventory, PartyDirectory, SlotDetail, StructureDefinition,
    StructureRepository, StructureSlots,
};
use parkstack_domain::{
    Car, CarId, Customer, CustomerId, DomainError, MAX_NAME_LENGTH, Operator, OperatorId,
    ParkingRequest, Project, ProjectId, RequestId, Scope, SlotId, Structure, StructureId, User,
    UserId, UserRole, validate_name, validate_plate,
};
use parkstack_events::{Notification, SlotSummary};
use parkstack_persistence::{PersistenceError, SqlitePersistence};
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::{
    ApiError, InputError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::request_response::{
    ActorRequest, AssignSlotRequest, BootstrapAdminRequest, CarResponse, CreateParkingRequest,
    CreateParkingResponse, CreateProfileRequest, CreateProjectRequest, CustomerResponse,
    DefineStructureRequest, GenerateInventoryRequest, GenerateInventoryResponse,
    ListParkingRequestsResponse, OperatorResponse, ParkingRequestResponse, ProjectResponse,
    RegisterCarRequest, RegisterUserRequest, SetApprovalStatusRequest, SlotDetailResponse,
    SlotGroupInfo, SlotInfo, SlotListingInfo, StructureInfo, StructureResponse,
    StructureSlotsResponse, UpdateRequestStatusRequest, UserResponse,
};

/// The result of an API operation: the response and the notifications it
/// produced.
///
/// Notifications are only built after the state change succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// Notifications to hand to the delivery layer.
    pub notifications: Vec<Notification>,
}

impl<T> ApiResult<T> {
    const fn quiet(response: T) -> Self {
        Self {
            response,
            notifications: Vec::new(),
        }
    }
}

fn positive_id(field: &'static str, value: i64) -> Result<i64, InputError> {
    if value <= 0 {
        return Err(InputError::NonPositiveId { field, value });
    }
    Ok(value)
}

fn authenticate(
    persistence: &mut SqlitePersistence,
    actor_user_id: i64,
) -> Result<AuthenticatedActor, ApiError> {
    let actor: AuthenticatedActor =
        AuthenticationService::authenticate(persistence, actor_user_id)?;
    debug!(actor_user_id, role = %actor.role(), "Handling request");
    Ok(actor)
}

/// Translates a core failure and logs it as the operation's outcome.
fn refused(operation: &'static str) -> impl Fn(CoreError) -> ApiError {
    move |err: CoreError| {
        let err: ApiError = translate_core_error(err);
        info!(operation, error = %err, "Operation refused");
        err
    }
}

fn resolve_user(persistence: &mut SqlitePersistence, user_id: i64) -> Result<User, ApiError> {
    let user_id: UserId = UserId::new(positive_id("user_id", user_id)?);
    persistence
        .user_by_id(user_id)
        .map_err(|e| translate_core_error(e.into()))?
        .ok_or_else(|| translate_domain_error(DomainError::UserNotFound(user_id)))
}

/// Builds the scope for a new profile, checking the project owns the structure.
fn resolve_scope(
    persistence: &mut SqlitePersistence,
    project_id: i64,
    structure_id: i64,
) -> Result<Scope, ApiError> {
    let project_id: ProjectId = ProjectId::new(positive_id("project_id", project_id)?);
    let structure_id: StructureId = StructureId::new(positive_id("structure_id", structure_id)?);

    let project: Option<Project> = persistence
        .project_by_id(project_id)
        .map_err(|e| translate_core_error(e.into()))?;
    if project.is_none() {
        return Err(translate_domain_error(DomainError::ProjectNotFound(
            project_id,
        )));
    }

    let structure: Structure = persistence
        .structure_by_id(structure_id)
        .map_err(|e| translate_core_error(e.into()))?
        .ok_or_else(|| translate_domain_error(DomainError::StructureNotFound(structure_id)))?;

    Scope::for_structure(project_id, &structure).map_err(translate_domain_error)
}

fn require_role(user: &User, expected: UserRole) -> Result<(), InputError> {
    if user.role == expected {
        return Ok(());
    }
    Err(InputError::RoleMismatch {
        user_id: user.id.value(),
        expected: expected.as_str(),
        actual: user.role.to_string(),
    })
}

fn normalize_model(model: Option<&str>) -> Result<Option<String>, InputError> {
    let Some(model) = model else {
        return Ok(None);
    };
    let trimmed: &str = model.trim();
    if trimmed.is_empty() {
        return Err(InputError::BlankOptional { field: "model" });
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(InputError::TooLong {
            field: "model",
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(Some(trimmed.to_string()))
}

fn slot_summary(detail: &SlotDetail, car: &Car) -> SlotSummary {
    SlotSummary {
        slot_id: detail.slot.id,
        structure_id: detail.structure.id,
        structure_name: detail.structure.name.clone(),
        project_name: detail.project.name.clone(),
        display_number: detail.slot.display_number,
        level: detail.slot.position.level(),
        below_ground_level: detail.slot.position.below_ground_level(),
        column: detail.slot.position.column(),
        status: detail.slot.status(),
        car_id: car.id,
        plate: car.plate.clone(),
    }
}

/// The user to tell about a change to `detail`'s occupant.
fn occupant_recipient(detail: &SlotDetail) -> Option<(UserId, &Car)> {
    detail.occupant.as_ref().map(|occupant| {
        let recipient: UserId = occupant
            .customer
            .as_ref()
            .map_or(occupant.car.owner_user_id, |c| c.user_id);
        (recipient, &occupant.car)
    })
}

// ============================================================================
// Provisioning
// ============================================================================

/// Creates the first administrator.
///
/// Needs no actor; only succeeds while the system has no users.
///
/// # Errors
///
/// Returns an error if:
/// - The username is invalid
/// - Any user already exists
/// - Persistence fails
pub fn bootstrap_admin(
    persistence: &mut SqlitePersistence,
    request: &BootstrapAdminRequest,
) -> Result<ApiResult<UserResponse>, ApiError> {
    let username: String =
        validate_name("username", &request.username).map_err(translate_domain_error)?;

    let user: User = persistence
        .bootstrap_admin(&username)
        .map_err(|e| translate_persistence_error("bootstrap admin", &e))?
        .ok_or_else(|| translate_domain_error(DomainError::AlreadyBootstrapped))?;

    info!(user_id = %user.id, username = %user.username, "Bootstrapped admin");
    Ok(ApiResult::quiet(UserResponse {
        message: format!("Created administrator '{}'", user.username),
        user,
    }))
}

/// Creates a project.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the name is invalid, or
/// persistence fails.
pub fn create_project(
    persistence: &mut SqlitePersistence,
    request: &CreateProjectRequest,
) -> Result<ApiResult<ProjectResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_provisioning(&actor, "create_project")?;

    let name: String = validate_name("name", &request.name).map_err(translate_domain_error)?;
    let project: Project = persistence
        .create_project(&name)
        .map_err(|e| translate_persistence_error("create project", &e))?;
    info!(project_id = %project.id, name = %project.name, "Created project");

    Ok(ApiResult::quiet(ProjectResponse {
        message: format!("Created project '{}'", project.name),
        project,
    }))
}

/// Registers a user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The username is invalid or already taken
/// - Persistence fails
pub fn register_user(
    persistence: &mut SqlitePersistence,
    request: &RegisterUserRequest,
) -> Result<ApiResult<UserResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_provisioning(&actor, "register_user")?;

    let username: String =
        validate_name("username", &request.username).map_err(translate_domain_error)?;
    let user: User = persistence
        .create_user(&username, request.role)
        .map_err(|e: PersistenceError| {
            if e.is_constraint_violation() {
                translate_domain_error(DomainError::DuplicateUsername(username.clone()))
            } else {
                translate_persistence_error("register user", &e)
            }
        })?;
    info!(user_id = %user.id, role = %user.role, "Registered user");

    Ok(ApiResult::quiet(UserResponse {
        message: format!("Registered {} '{}'", user.role, user.username),
        user,
    }))
}

/// Registers a car for an existing user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The owner does not exist
/// - The plate or model is invalid
/// - Persistence fails
pub fn register_car(
    persistence: &mut SqlitePersistence,
    request: &RegisterCarRequest,
) -> Result<ApiResult<CarResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_provisioning(&actor, "register_car")?;

    let owner: User = resolve_user(persistence, request.owner_user_id)?;
    let plate: String = validate_plate(&request.plate).map_err(translate_domain_error)?;
    let model: Option<String> = normalize_model(request.model.as_deref())?;

    let car: Car = persistence
        .create_car(owner.id, &plate, model.as_deref())
        .map_err(|e| translate_persistence_error("register car", &e))?;
    info!(car_id = %car.id, owner_user_id = %owner.id, "Registered car");

    Ok(ApiResult::quiet(CarResponse {
        message: format!("Registered car {} for '{}'", car.plate, owner.username),
        car,
    }))
}

/// Creates a `pending` customer profile for a customer user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The user, project, or structure does not exist
/// - The user is not a customer or already has a profile
/// - The structure belongs to another project
/// - Persistence fails
pub fn create_customer(
    persistence: &mut SqlitePersistence,
    request: &CreateProfileRequest,
) -> Result<ApiResult<CustomerResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_provisioning(&actor, "create_customer")?;

    let user: User = resolve_user(persistence, request.user_id)?;
    require_role(&user, UserRole::Customer)?;
    let scope: Scope = resolve_scope(persistence, request.project_id, request.structure_id)?;

    let customer: Customer = persistence
        .create_customer(user.id, scope)
        .map_err(|e: PersistenceError| {
            if e.is_constraint_violation() {
                ApiError::Conflict {
                    rule: String::from("one_customer_profile"),
                    message: format!("User {} already has a customer profile", user.id),
                }
            } else {
                translate_persistence_error("create customer profile", &e)
            }
        })?;
    info!(customer_id = %customer.id, user_id = %user.id, "Created customer profile");

    Ok(ApiResult::quiet(CustomerResponse {
        message: format!("Created customer profile {}", customer.id),
        customer,
    }))
}

/// Creates a `pending` operator profile for an operator user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The user, project, or structure does not exist
/// - The user is not an operator or already has a profile
/// - The structure belongs to another project
/// - Persistence fails
pub fn create_operator(
    persistence: &mut SqlitePersistence,
    request: &CreateProfileRequest,
) -> Result<ApiResult<OperatorResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_provisioning(&actor, "create_operator")?;

    let user: User = resolve_user(persistence, request.user_id)?;
    require_role(&user, UserRole::Operator)?;
    let scope: Scope = resolve_scope(persistence, request.project_id, request.structure_id)?;

    let operator: Operator = persistence
        .create_operator(user.id, scope)
        .map_err(|e: PersistenceError| {
            if e.is_constraint_violation() {
                ApiError::Conflict {
                    rule: String::from("one_operator_profile"),
                    message: format!("User {} already has an operator profile", user.id),
                }
            } else {
                translate_persistence_error("create operator profile", &e)
            }
        })?;
    info!(operator_id = %operator.id, user_id = %user.id, "Created operator profile");

    Ok(ApiResult::quiet(OperatorResponse {
        message: format!("Created operator profile {}", operator.id),
        operator,
    }))
}

/// Sets a customer profile's approval status.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the customer does not
/// exist, or persistence fails.
pub fn set_customer_status(
    persistence: &mut SqlitePersistence,
    customer_id: i64,
    request: &SetApprovalStatusRequest,
) -> Result<ApiResult<CustomerResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_provisioning(&actor, "set_customer_status")?;

    let customer_id: CustomerId = CustomerId::new(positive_id("customer_id", customer_id)?);
    let customer: Customer = persistence
        .set_customer_status(customer_id, request.status)
        .map_err(|e| translate_persistence_error("update customer status", &e))?
        .ok_or_else(|| translate_domain_error(DomainError::CustomerNotFound(customer_id)))?;
    info!(customer_id = %customer.id, status = %customer.status, "Customer status set");

    Ok(ApiResult::quiet(CustomerResponse {
        message: format!("Customer {} is now {}", customer.id, customer.status),
        customer,
    }))
}

/// Sets an operator profile's approval status.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the operator does not
/// exist, or persistence fails.
pub fn set_operator_status(
    persistence: &mut SqlitePersistence,
    operator_id: i64,
    request: &SetApprovalStatusRequest,
) -> Result<ApiResult<OperatorResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_provisioning(&actor, "set_operator_status")?;

    let operator_id: OperatorId = OperatorId::new(positive_id("operator_id", operator_id)?);
    let operator: Operator = persistence
        .set_operator_status(operator_id, request.status)
        .map_err(|e| translate_persistence_error("update operator status", &e))?
        .ok_or_else(|| translate_domain_error(DomainError::OperatorNotFound(operator_id)))?;
    info!(operator_id = %operator.id, status = %operator.status, "Operator status set");

    Ok(ApiResult::quiet(OperatorResponse {
        message: format!("Operator {} is now {}", operator.id, operator.status),
        operator,
    }))
}

// ============================================================================
// Structures and inventory
// ============================================================================

/// Defines a structure inside a project.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The project does not exist
/// - The name or geometry is invalid
/// - Persistence fails
pub fn define_structure(
    persistence: &mut SqlitePersistence,
    request: &DefineStructureRequest,
) -> Result<ApiResult<StructureResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_define_structure(&actor)?;

    let definition: StructureDefinition = StructureDefinition {
        project_id: ProjectId::new(positive_id("project_id", request.project_id)?),
        name: request.name.clone(),
        kind: request.kind,
        levels_above_ground: request.levels_above_ground,
        columns: request.columns,
        levels_below_ground: request.levels_below_ground,
        motion: request.motion.unwrap_or_default(),
    };

    let structure: Structure = parkstack::define_structure(persistence, &definition)
        .map_err(refused("define_structure"))?;
    info!(
        structure_id = %structure.id,
        kind = %structure.geometry.kind(),
        total_slots = structure.geometry.total_slots(),
        "Defined structure"
    );

    Ok(ApiResult::quiet(StructureResponse {
        message: format!(
            "Defined {} structure '{}' with {} slots",
            structure.geometry.kind(),
            structure.name,
            structure.geometry.total_slots()
        ),
        structure: StructureInfo::from(&structure),
    }))
}

/// Generates a structure's slot inventory.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The starting number is not positive
/// - The structure does not exist or already has an inventory
/// - Persistence fails
pub fn generate_inventory(
    persistence: &mut SqlitePersistence,
    structure_id: i64,
    request: &GenerateInventoryRequest,
) -> Result<ApiResult<GenerateInventoryResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_generate_inventory(&actor)?;

    let structure_id: StructureId = StructureId::new(positive_id("structure_id", structure_id)?);
    let inventory: GeneratedInventory =
        parkstack::generate_inventory(persistence, structure_id, request.starting_number)
            .map_err(refused("generate_inventory"))?;
    info!(
        structure_id = %inventory.structure_id,
        total_created = inventory.total_created,
        starting_number = inventory.starting_number,
        ending_number = inventory.ending_number,
        "Slot inventory generated"
    );

    Ok(ApiResult::quiet(GenerateInventoryResponse {
        structure_id: inventory.structure_id.value(),
        slots: inventory.slots.iter().map(SlotInfo::from).collect(),
        total_created: inventory.total_created,
        starting_number: inventory.starting_number,
        ending_number: inventory.ending_number,
        message: format!(
            "Created {} slots numbered {} to {}",
            inventory.total_created, inventory.starting_number, inventory.ending_number
        ),
    }))
}

/// Lists a structure's slots with their occupants, grouped by level.
///
/// Operators may only list structures in their own project.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is a customer
/// - The structure does not exist
/// - An operator actor has no profile or belongs to another project
/// - Persistence fails
pub fn list_structure_slots(
    persistence: &mut SqlitePersistence,
    structure_id: i64,
    actor_user_id: i64,
) -> Result<StructureSlotsResponse, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, actor_user_id)?;
    AuthorizationService::authorize_list_slots(&actor)?;

    let structure_id: StructureId = StructureId::new(positive_id("structure_id", structure_id)?);
    let listing: StructureSlots =
        parkstack::list_structure_slots(persistence, structure_id).map_err(translate_core_error)?;

    if actor.role() == UserRole::Operator {
        let operator: Operator = persistence
            .operator_by_user(actor.user_id())
            .map_err(|e| translate_core_error(e.into()))?
            .ok_or_else(|| {
                translate_domain_error(DomainError::OperatorProfileNotFound {
                    user_id: actor.user_id(),
                })
            })?;
        if operator.scope.project_id != listing.project.id {
            return Err(translate_domain_error(DomainError::ScopeViolation {
                actor_project: operator.scope.project_id,
                resource_project: listing.project.id,
            }));
        }
    }

    debug!(structure_id = %structure_id, groups = listing.groups.len(), "Listed slots");
    Ok(StructureSlotsResponse {
        structure: StructureInfo::from(&listing.structure),
        project: listing.project,
        groups: listing
            .groups
            .iter()
            .map(|group| SlotGroupInfo {
                label: group.label.clone(),
                slots: group.slots.iter().map(SlotListingInfo::from).collect(),
            })
            .collect(),
    })
}

// ============================================================================
// Allocation
// ============================================================================

/// Binds a released slot to a customer's car.
///
/// Notifies the customer with `slot-assigned`.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The slot, customer, or car cannot be resolved in the operator's scope
/// - The slot is taken, the car is parked elsewhere, or the customer is not approved
/// - Persistence fails
pub fn assign_slot(
    persistence: &mut SqlitePersistence,
    slot_id: i64,
    request: &AssignSlotRequest,
) -> Result<ApiResult<SlotDetailResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_slot_allocation(&actor, "assign_slot")?;

    let slot_id: SlotId = SlotId::new(positive_id("slot_id", slot_id)?);
    let customer_id: CustomerId =
        CustomerId::new(positive_id("customer_id", request.customer_id)?);
    let car_id: Option<CarId> = request
        .car_id
        .map(|id| positive_id("car_id", id).map(CarId::new))
        .transpose()?;

    let detail: SlotDetail =
        parkstack::assign_slot(persistence, actor.user_id(), slot_id, customer_id, car_id)
            .map_err(refused("assign_slot"))?;

    let notifications: Vec<Notification> = occupant_recipient(&detail)
        .map(|(recipient, car)| Notification::slot_assigned(recipient, slot_summary(&detail, car)))
        .into_iter()
        .collect();

    info!(
        slot_id = %detail.slot.id,
        operator_user_id = %actor.user_id(),
        notifications = notifications.len(),
        "Slot assigned"
    );
    let message: String = format!(
        "Slot {} assigned to car {}",
        detail.slot.display_number,
        detail
            .slot
            .car_id()
            .map_or_else(String::new, |id| id.to_string())
    );
    Ok(ApiResult {
        response: SlotDetailResponse::from_detail(&detail, message),
        notifications,
    })
}

/// Returns an assigned slot to the released pool.
///
/// Notifies the former occupant's customer with `slot-released`.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The slot cannot be resolved in the operator's scope
/// - The slot is not assigned
/// - Persistence fails
pub fn release_slot(
    persistence: &mut SqlitePersistence,
    slot_id: i64,
    request: &ActorRequest,
) -> Result<ApiResult<SlotDetailResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_slot_allocation(&actor, "release_slot")?;

    let slot_id: SlotId = SlotId::new(positive_id("slot_id", slot_id)?);
    let detail: SlotDetail = parkstack::release_slot(persistence, actor.user_id(), slot_id)
        .map_err(refused("release_slot"))?;

    let notifications: Vec<Notification> = occupant_recipient(&detail)
        .map(|(recipient, car)| {
            Notification::slot_released(recipient, slot_summary(&detail, car))
        })
        .into_iter()
        .collect();

    info!(
        slot_id = %detail.slot.id,
        operator_user_id = %actor.user_id(),
        notifications = notifications.len(),
        "Slot released"
    );
    let message: String = format!("Slot {} released", detail.slot.display_number);
    Ok(ApiResult {
        response: SlotDetailResponse::from_detail(&detail, message),
        notifications,
    })
}

// ============================================================================
// Parking requests
// ============================================================================

/// Raises a parking request for one of the customer's cars.
///
/// Notifies the routed operator with `request-created`.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a customer or has no customer profile
/// - The car does not belong to the actor
/// - No approved operator serves the customer's scope
/// - Persistence fails
pub fn create_parking_request(
    persistence: &mut SqlitePersistence,
    request: &CreateParkingRequest,
) -> Result<ApiResult<CreateParkingResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_customer_request(&actor, "create_request")?;

    let car_id: CarId = CarId::new(positive_id("car_id", request.car_id)?);
    let created: CreatedRequest = parkstack::create_request(persistence, actor.user_id(), car_id)
        .map_err(refused("create_request"))?;

    let notification: Notification =
        Notification::request_created(created.operator.user_id, &created.request);
    info!(
        request_id = %created.request.id,
        operator_id = %created.operator.id,
        "Parking request routed"
    );

    Ok(ApiResult {
        response: CreateParkingResponse {
            message: format!(
                "Parking request {} sent to operator {}",
                created.request.id, created.operator.id
            ),
            request: created.request,
            operator: created.operator,
        },
        notifications: vec![notification],
    })
}

/// Lists the requests routed to the acting operator, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not an operator, has no operator
/// profile, or persistence fails.
pub fn list_operator_requests(
    persistence: &mut SqlitePersistence,
    actor_user_id: i64,
) -> Result<ListParkingRequestsResponse, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, actor_user_id)?;
    AuthorizationService::authorize_request_handling(&actor, "list_operator_requests")?;

    let requests: Vec<ParkingRequest> =
        parkstack::list_for_operator(persistence, actor.user_id()).map_err(translate_core_error)?;
    debug!(operator_user_id = %actor.user_id(), count = requests.len(), "Listed operator requests");
    Ok(ListParkingRequestsResponse { requests })
}

/// Lists the acting customer's requests, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not a customer, has no customer
/// profile, or persistence fails.
pub fn list_my_requests(
    persistence: &mut SqlitePersistence,
    actor_user_id: i64,
) -> Result<ListParkingRequestsResponse, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, actor_user_id)?;
    AuthorizationService::authorize_customer_request(&actor, "list_my_requests")?;

    let requests: Vec<ParkingRequest> =
        parkstack::list_for_customer(persistence, actor.user_id()).map_err(translate_core_error)?;
    debug!(user_id = %actor.user_id(), count = requests.len(), "Listed customer requests");
    Ok(ListParkingRequestsResponse { requests })
}

/// Moves a parking request along its lifecycle.
///
/// Notifies the requesting customer with `request-accepted` or
/// `request-completed`.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The request does not exist or is routed to another operator
/// - The transition is not allowed from the current status
/// - Persistence fails
pub fn update_request_status(
    persistence: &mut SqlitePersistence,
    request_id: i64,
    request: &UpdateRequestStatusRequest,
) -> Result<ApiResult<ParkingRequestResponse>, ApiError> {
    let actor: AuthenticatedActor = authenticate(persistence, request.actor_user_id)?;
    AuthorizationService::authorize_request_handling(&actor, "update_request_status")?;

    let request_id: RequestId = RequestId::new(positive_id("request_id", request_id)?);
    let updated: ParkingRequest =
        parkstack::update_status(persistence, actor.user_id(), request_id, request.status)
            .map_err(refused("update_request_status"))?;

    let notifications: Vec<Notification> = Notification::request_status_changed(&updated)
        .into_iter()
        .collect();
    info!(
        request_id = %updated.id,
        operator_user_id = %actor.user_id(),
        status = %updated.status,
        notifications = notifications.len(),
        "Parking request updated"
    );

    Ok(ApiResult {
        response: ParkingRequestResponse {
            message: format!("Parking request {} is now {}", updated.id, updated.status),
            request: updated,
        },
        notifications,
    })
}
