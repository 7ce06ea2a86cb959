// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Autolot dealership backend.
//!
//! This crate owns the credential codec, the access gate with its
//! operation table, the error taxonomy with its numeric codes, the wire
//! DTOs, and the handler functions the HTTP server calls into.

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

mod auth;
mod credential;
mod error;
mod handlers;
mod operations;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AccessGate, AuthenticationService, BEARER_PREFIX, bearer_token};
pub use credential::{Claims, CredentialCodec, CredentialError};
pub use error::{
    ApiError, GateError, translate_domain_error, translate_persistence_error, translate_sale_error,
};
pub use handlers::{
    create_customer, create_order, create_vehicle, current_principal, delete_customer,
    delete_vehicle, get_customer, get_order, get_vehicle, health, list_salespersons, login,
    update_customer, update_vehicle, update_vehicle_status,
};
pub use operations::Operation;
pub use request_response::{
    ApiResponse, CreateCustomerRequest, CreateOrderRequest, CreateVehicleRequest, CustomerResponse,
    HealthResponse, LoginRequest, LoginResponse, OrderDetailResponse, UpdateCustomerRequest,
    UpdateVehicleRequest, UpdateVehicleStatusRequest, UserInfo, VehicleResponse,
};
