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

mod gate;
mod oplog;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use autolot_api::{
    ApiError, ApiResponse, CreateCustomerRequest, CreateOrderRequest, CreateVehicleRequest,
    CredentialCodec, CustomerResponse, HealthResponse, LoginRequest, LoginResponse,
    OrderDetailResponse, UpdateCustomerRequest, UpdateVehicleRequest, UpdateVehicleStatusRequest,
    UserInfo, VehicleResponse, bearer_token, create_customer, create_order, create_vehicle,
    current_principal, delete_customer, delete_vehicle, get_customer, get_order, get_vehicle,
    health, list_salespersons, login, update_customer, update_vehicle, update_vehicle_status,
};
use autolot_domain::Role;
use autolot_persistence::{Persistence, PersistenceError};
use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use crate::gate::{Gate, ops};
use crate::oplog::{ErrorCode, record_operation};

/// Autolot Server - HTTP server for the Autolot dealership backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "AUTOLOT_DATABASE")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Mutually exclusive with `--database`.
    #[arg(long, env = "AUTOLOT_MYSQL_URL", conflicts_with = "database")]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "AUTOLOT_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "AUTOLOT_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Secret used to sign credentials (at least 32 bytes)
    #[arg(long, env = "AUTOLOT_TOKEN_SECRET", hide_env_values = true)]
    token_secret: String,

    /// Credential lifetime in hours
    #[arg(long, env = "AUTOLOT_TOKEN_TTL_HOURS", default_value_t = 24)]
    token_ttl_hours: u32,

    /// Upper bound in milliseconds on waiting for the store
    #[arg(long, env = "AUTOLOT_STORE_TIMEOUT_MS", default_value_t = 5000)]
    store_timeout_ms: u64,

    /// Username of an admin to create at startup if it does not exist
    #[arg(long, env = "AUTOLOT_BOOTSTRAP_ADMIN", requires = "bootstrap_admin_password")]
    bootstrap_admin: Option<String>,

    /// Password for the bootstrap admin
    #[arg(long, env = "AUTOLOT_BOOTSTRAP_ADMIN_PASSWORD", hide_env_values = true)]
    bootstrap_admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; every acquisition is bounded
/// by `store_timeout`.
#[derive(Clone)]
struct AppState {
    /// The record store.
    persistence: Arc<Mutex<Persistence>>,
    /// Issues and verifies bearer credentials.
    codec: Arc<CredentialCodec>,
    /// How long a request waits for the store before failing.
    store_timeout: Duration,
}

impl AppState {
    /// Acquires the store, failing with code 5004 once `store_timeout` elapses.
    async fn lock_persistence(&self) -> Result<MutexGuard<'_, Persistence>, HttpError> {
        tokio::time::timeout(self.store_timeout, self.persistence.lock())
            .await
            .map_err(|_| {
                warn!(timeout_ms = self.store_timeout.as_millis(), "Store busy");
                HttpError::from(ApiError::Internal {
                    message: String::from("store is busy, please retry"),
                })
            })
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
///
/// Business errors are delivered with HTTP 200; the code travels in the
/// envelope.
#[derive(Debug)]
struct HttpError(ApiError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ApiResponse<()>> = Json(ApiResponse::failure(&self.0));
        let mut response: Response = (StatusCode::OK, body).into_response();
        response.extensions_mut().insert(ErrorCode(self.0.code()));
        response
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        if let ApiError::Internal { message } = &err {
            error!(error = %message, "Internal error");
        }
        Self(err)
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self(ApiError::Internal {
            message: format!("Persistence error: {err}"),
        })
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, HttpError>;

/// Handler for GET `/api/health` endpoint.
async fn handle_health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(health()))
}

/// Handler for POST `/api/auth/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let response: LoginResponse = login(&mut persistence, &app_state.codec, &req)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(response)))
}

/// Handler for POST `/api/auth/logout` endpoint.
///
/// Credentials are stateless, so there is nothing to revoke.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Json<ApiResponse<()>> {
    let username: Option<String> = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| bearer_token(Some(header)).ok())
        .and_then(|token| app_state.codec.verify(token).ok())
        .map(|claims| claims.sub);
    info!(username = ?username, "Logout");

    Json(ApiResponse::success(()))
}

/// Handler for GET `/api/auth/info` endpoint.
async fn handle_current_principal(
    Gate(principal, _): Gate<ops::CurrentPrincipal>,
) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(current_principal(&principal)))
}

/// Handler for GET `/api/auth/salespersons` endpoint.
async fn handle_list_salespersons(
    AxumState(app_state): AxumState<AppState>,
    Gate(_, _): Gate<ops::ListSalespersons>,
) -> ApiResult<Vec<UserInfo>> {
    let mut persistence = app_state.lock_persistence().await?;
    let salespersons: Vec<UserInfo> = list_salespersons(&mut persistence)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(salespersons)))
}

/// Handler for POST `/api/orders` endpoint.
///
/// Sells a vehicle on behalf of the authenticated principal.
async fn handle_create_order(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::CreateOrder>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<OrderDetailResponse> {
    info!(
        username = %principal.username,
        vehicle_id = req.vehicle_id,
        customer_id = req.customer_id,
        "Handling create_order request"
    );

    let mut persistence = app_state.lock_persistence().await?;
    let detail: OrderDetailResponse = create_order(&mut persistence, &principal, &req)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(detail)))
}

/// Handler for GET `/api/orders/{id}` endpoint.
async fn handle_get_order(
    AxumState(app_state): AxumState<AppState>,
    Gate(_, _): Gate<ops::GetOrder>,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderDetailResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let detail: OrderDetailResponse = get_order(&mut persistence, order_id)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(detail)))
}

/// Handler for POST `/api/customers` endpoint.
async fn handle_create_customer(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::CreateCustomer>,
    Json(req): Json<CreateCustomerRequest>,
) -> ApiResult<CustomerResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let customer: CustomerResponse = create_customer(&mut persistence, &principal, &req)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(customer)))
}

/// Handler for GET `/api/customers/{id}` endpoint.
async fn handle_get_customer(
    AxumState(app_state): AxumState<AppState>,
    Gate(_, _): Gate<ops::GetCustomer>,
    Path(customer_id): Path<i64>,
) -> ApiResult<CustomerResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let customer: CustomerResponse = get_customer(&mut persistence, customer_id)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(customer)))
}

/// Handler for PUT `/api/customers/{id}` endpoint.
///
/// Absent fields keep their stored values.
async fn handle_update_customer(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::UpdateCustomer>,
    Path(customer_id): Path<i64>,
    Json(req): Json<UpdateCustomerRequest>,
) -> ApiResult<CustomerResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let customer: CustomerResponse =
        update_customer(&mut persistence, &principal, customer_id, &req)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(customer)))
}

/// Handler for DELETE `/api/customers/{id}` endpoint.
async fn handle_delete_customer(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::DeleteCustomer>,
    Path(customer_id): Path<i64>,
) -> ApiResult<()> {
    let mut persistence = app_state.lock_persistence().await?;
    delete_customer(&mut persistence, &principal, customer_id)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(())))
}

/// Handler for POST `/api/vehicles` endpoint.
async fn handle_create_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::CreateVehicle>,
    Json(req): Json<CreateVehicleRequest>,
) -> ApiResult<VehicleResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let vehicle: VehicleResponse = create_vehicle(&mut persistence, &principal, &req)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(vehicle)))
}

/// Handler for GET `/api/vehicles/{id}` endpoint.
async fn handle_get_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Gate(_, _): Gate<ops::GetVehicle>,
    Path(vehicle_id): Path<i64>,
) -> ApiResult<VehicleResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let vehicle: VehicleResponse = get_vehicle(&mut persistence, vehicle_id)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(vehicle)))
}

/// Handler for PUT `/api/vehicles/{id}` endpoint.
///
/// Edits the descriptive fields; the status is only changed through the
/// status endpoint and the sales path.
async fn handle_update_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::UpdateVehicle>,
    Path(vehicle_id): Path<i64>,
    Json(req): Json<UpdateVehicleRequest>,
) -> ApiResult<VehicleResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let vehicle: VehicleResponse = update_vehicle(&mut persistence, &principal, vehicle_id, &req)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(vehicle)))
}

/// Handler for DELETE `/api/vehicles/{id}` endpoint.
async fn handle_delete_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::DeleteVehicle>,
    Path(vehicle_id): Path<i64>,
) -> ApiResult<()> {
    let mut persistence = app_state.lock_persistence().await?;
    delete_vehicle(&mut persistence, &principal, vehicle_id)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(())))
}

/// Handler for PUT `/api/vehicles/{id}/status` endpoint.
async fn handle_update_vehicle_status(
    AxumState(app_state): AxumState<AppState>,
    Gate(principal, _): Gate<ops::UpdateVehicleStatus>,
    Path(vehicle_id): Path<i64>,
    Json(req): Json<UpdateVehicleStatusRequest>,
) -> ApiResult<VehicleResponse> {
    let mut persistence = app_state.lock_persistence().await?;
    let vehicle: VehicleResponse =
        update_vehicle_status(&mut persistence, &principal, vehicle_id, &req)?;
    drop(persistence);

    Ok(Json(ApiResponse::success(vehicle)))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/info", get(handle_current_principal))
        .route("/api/auth/salespersons", get(handle_list_salespersons))
        .route("/api/orders", post(handle_create_order))
        .route("/api/orders/{id}", get(handle_get_order))
        .route("/api/customers", post(handle_create_customer))
        .route(
            "/api/customers/{id}",
            get(handle_get_customer)
                .put(handle_update_customer)
                .delete(handle_delete_customer),
        )
        .route("/api/vehicles", post(handle_create_vehicle))
        .route(
            "/api/vehicles/{id}",
            get(handle_get_vehicle)
                .put(handle_update_vehicle)
                .delete(handle_delete_vehicle),
        )
        .route(
            "/api/vehicles/{id}/status",
            put(handle_update_vehicle_status),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            record_operation,
        ))
        .with_state(app_state)
}

/// Creates the bootstrap admin unless a principal with that username exists.
fn bootstrap_admin(
    persistence: &mut Persistence,
    username: &str,
    password: &str,
) -> Result<(), PersistenceError> {
    if persistence.get_principal_by_username(username)?.is_some() {
        info!(username, "Bootstrap admin already exists");
        return Ok(());
    }

    let principal_id: i64 =
        persistence.create_principal(username, "Administrator", None, password, Role::Admin)?;
    info!(principal_id, username, "Created bootstrap admin");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Autolot Server");

    let codec: CredentialCodec = CredentialCodec::new(
        args.token_secret.as_bytes(),
        time::Duration::hours(i64::from(args.token_ttl_hours)),
    )?;
    let store_timeout: Duration = Duration::from_millis(args.store_timeout_ms);

    let mut persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.set_store_timeout(store_timeout)?;

    if let (Some(username), Some(password)) =
        (&args.bootstrap_admin, &args.bootstrap_admin_password)
    {
        bootstrap_admin(&mut persistence, username, password)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        codec: Arc::new(codec),
        store_timeout,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
