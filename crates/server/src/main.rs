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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use live::{ConnectionRegistry, DEFAULT_LIVE_BUFFER, live_notifications_handler};
use parkstack_api::{
    ActorRequest, ApiError, ApiResult, AssignSlotRequest, BootstrapAdminRequest, CarResponse,
    CreateParkingRequest, CreateParkingResponse, CreateProfileRequest, CreateProjectRequest,
    CustomerResponse, DefineStructureRequest, GenerateInventoryRequest, GenerateInventoryResponse,
    ListParkingRequestsResponse, OperatorResponse, ParkingRequestResponse, ProjectResponse,
    RegisterCarRequest, RegisterUserRequest, SetApprovalStatusRequest, SlotDetailResponse,
    StructureResponse, StructureSlotsResponse, UpdateRequestStatusRequest, UserResponse,
};
use parkstack_persistence::SqlitePersistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// HTTP server for the parkstack parking system.
#[derive(Parser, Debug)]
#[command(name = "parkstack-server")]
#[command(about = "HTTP server for the parkstack parking system", long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. Uses in-memory storage if omitted.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind.
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Port to listen on.
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Notifications buffered per live connection before new ones are dropped.
    #[arg(long, default_value_t = DEFAULT_LIVE_BUFFER)]
    live_buffer: usize,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer, serialized behind a mutex.
    pub persistence: Arc<Mutex<SqlitePersistence>>,
    /// Open live connections.
    pub registry: Arc<ConnectionRegistry>,
}

/// Query naming the acting user on read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActorQuery {
    actor_user_id: i64,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Hands the result's notifications to the live registry and returns its body.
///
/// Runs after the persistence lock is released; delivery never fails the request.
fn respond<T>(app_state: &AppState, result: ApiResult<T>) -> Json<T> {
    app_state.registry.deliver_all(&result.notifications);
    Json(result.response)
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/bootstrap/admin`.
async fn handle_bootstrap_admin(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BootstrapAdminRequest>,
) -> Result<Json<UserResponse>, HttpError> {
    info!(username = %req.username, "Handling bootstrap_admin request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<UserResponse> = parkstack_api::bootstrap_admin(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/projects`.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<ProjectResponse>, HttpError> {
    info!(actor_user_id = req.actor_user_id, name = %req.name, "Handling create_project request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ProjectResponse> =
        parkstack_api::create_project(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/users`.
async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<UserResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        username = %req.username,
        role = %req.role,
        "Handling register_user request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<UserResponse> = parkstack_api::register_user(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/cars`.
async fn handle_register_car(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterCarRequest>,
) -> Result<Json<CarResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        owner_user_id = req.owner_user_id,
        "Handling register_car request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CarResponse> = parkstack_api::register_car(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/customers`.
async fn handle_create_customer(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Json<CustomerResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        user_id = req.user_id,
        structure_id = req.structure_id,
        "Handling create_customer request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CustomerResponse> =
        parkstack_api::create_customer(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/customers/{id}/status`.
async fn handle_set_customer_status(
    AxumState(app_state): AxumState<AppState>,
    Path(customer_id): Path<i64>,
    Json(req): Json<SetApprovalStatusRequest>,
) -> Result<Json<CustomerResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        customer_id,
        status = %req.status,
        "Handling set_customer_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CustomerResponse> =
        parkstack_api::set_customer_status(&mut persistence, customer_id, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/operators`.
async fn handle_create_operator(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Json<OperatorResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        user_id = req.user_id,
        structure_id = req.structure_id,
        "Handling create_operator request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<OperatorResponse> =
        parkstack_api::create_operator(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/operators/{id}/status`.
async fn handle_set_operator_status(
    AxumState(app_state): AxumState<AppState>,
    Path(operator_id): Path<i64>,
    Json(req): Json<SetApprovalStatusRequest>,
) -> Result<Json<OperatorResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        operator_id,
        status = %req.status,
        "Handling set_operator_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<OperatorResponse> =
        parkstack_api::set_operator_status(&mut persistence, operator_id, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/structures`.
async fn handle_define_structure(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DefineStructureRequest>,
) -> Result<Json<StructureResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        project_id = req.project_id,
        name = %req.name,
        "Handling define_structure request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<StructureResponse> =
        parkstack_api::define_structure(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/structures/{id}/inventory`.
async fn handle_generate_inventory(
    AxumState(app_state): AxumState<AppState>,
    Path(structure_id): Path<i64>,
    Json(req): Json<GenerateInventoryRequest>,
) -> Result<Json<GenerateInventoryResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        structure_id,
        starting_number = req.starting_number,
        "Handling generate_inventory request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<GenerateInventoryResponse> =
        parkstack_api::generate_inventory(&mut persistence, structure_id, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for GET `/structures/{id}/slots`.
async fn handle_list_structure_slots(
    AxumState(app_state): AxumState<AppState>,
    Path(structure_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<StructureSlotsResponse>, HttpError> {
    info!(
        actor_user_id = query.actor_user_id,
        structure_id, "Handling list_structure_slots request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: StructureSlotsResponse =
        parkstack_api::list_structure_slots(&mut persistence, structure_id, query.actor_user_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/slots/{id}/assign`.
async fn handle_assign_slot(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<AssignSlotRequest>,
) -> Result<Json<SlotDetailResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        slot_id,
        customer_id = req.customer_id,
        "Handling assign_slot request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SlotDetailResponse> =
        parkstack_api::assign_slot(&mut persistence, slot_id, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/slots/{id}/release`.
async fn handle_release_slot(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<SlotDetailResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        slot_id, "Handling release_slot request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SlotDetailResponse> =
        parkstack_api::release_slot(&mut persistence, slot_id, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for POST `/requests`.
async fn handle_create_parking_request(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateParkingRequest>,
) -> Result<Json<CreateParkingResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        car_id = req.car_id,
        "Handling create_parking_request request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CreateParkingResponse> =
        parkstack_api::create_parking_request(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Handler for GET `/requests/operator`.
async fn handle_list_operator_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ListParkingRequestsResponse>, HttpError> {
    info!(
        actor_user_id = query.actor_user_id,
        "Handling list_operator_requests request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListParkingRequestsResponse =
        parkstack_api::list_operator_requests(&mut persistence, query.actor_user_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/requests/mine`.
async fn handle_list_my_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ListParkingRequestsResponse>, HttpError> {
    info!(
        actor_user_id = query.actor_user_id,
        "Handling list_my_requests request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListParkingRequestsResponse =
        parkstack_api::list_my_requests(&mut persistence, query.actor_user_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/requests/{id}/status`.
async fn handle_update_request_status(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(req): Json<UpdateRequestStatusRequest>,
) -> Result<Json<ParkingRequestResponse>, HttpError> {
    info!(
        actor_user_id = req.actor_user_id,
        request_id,
        status = %req.status,
        "Handling update_request_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ParkingRequestResponse> =
        parkstack_api::update_request_status(&mut persistence, request_id, &req)?;
    drop(persistence);

    Ok(respond(&app_state, result))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/bootstrap/admin", post(handle_bootstrap_admin))
        .route("/projects", post(handle_create_project))
        .route("/users", post(handle_register_user))
        .route("/cars", post(handle_register_car))
        .route("/customers", post(handle_create_customer))
        .route("/customers/{id}/status", post(handle_set_customer_status))
        .route("/operators", post(handle_create_operator))
        .route("/operators/{id}/status", post(handle_set_operator_status))
        .route("/structures", post(handle_define_structure))
        .route("/structures/{id}/inventory", post(handle_generate_inventory))
        .route("/structures/{id}/slots", get(handle_list_structure_slots))
        .route("/slots/{id}/assign", post(handle_assign_slot))
        .route("/slots/{id}/release", post(handle_release_slot))
        .route("/requests", post(handle_create_parking_request))
        .route("/requests/operator", get(handle_list_operator_requests))
        .route("/requests/mine", get(handle_list_my_requests))
        .route("/requests/{id}/status", post(handle_update_request_status))
        .route("/live", get(live_notifications_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing parkstack server");

    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        warn!("Using in-memory database; state is lost on exit");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        registry: Arc::new(ConnectionRegistry::new(args.live_buffer)),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
