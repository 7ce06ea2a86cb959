// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access gate extraction for the server.
//!
//! Each protected handler names the operation it serves in its extractor
//! type, so the role check cannot be forgotten or attached to the wrong
//! route.

use std::marker::PhantomData;

use autolot::Principal;
use autolot_api::{AccessGate, ApiError, Operation};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::{AppState, HttpError};

/// Binds an extractor type to the operation it guards.
pub trait Guarded {
    /// The operation checked by the access gate.
    const OPERATION: Operation;
}

macro_rules! guarded_operations {
    ($($marker:ident),* $(,)?) => {
        /// Marker types for the operations that require a principal.
        pub mod ops {
            use autolot_api::Operation;

            use super::Guarded;

            $(
                #[doc = concat!("Marker for [`Operation::", stringify!($marker), "`].")]
                pub enum $marker {}

                impl Guarded for $marker {
                    const OPERATION: Operation = Operation::$marker;
                }
            )*
        }
    };
}

guarded_operations!(
    CurrentPrincipal,
    ListSalespersons,
    CreateOrder,
    GetOrder,
    CreateCustomer,
    GetCustomer,
    UpdateCustomer,
    DeleteCustomer,
    CreateVehicle,
    GetVehicle,
    UpdateVehicle,
    DeleteVehicle,
    UpdateVehicleStatus,
);

/// Extractor for a principal admitted to operation `O`.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     Gate(principal, _): Gate<ops::CreateOrder>,
/// ) -> Result<Json<ApiResponse<OrderDetailResponse>>, HttpError> {
///     // principal: Principal, freshly re-resolved from the store
/// }
/// ```
///
/// # Errors
///
/// Rejects with an envelope carrying code 1002 if the credential is
/// missing, invalid, expired, or names a principal that is gone or
/// disabled, and code 1003 if the principal's current role is not allowed.
pub struct Gate<O>(pub Principal, pub PhantomData<fn() -> O>);

impl<O: Guarded> FromRequestParts<AppState> for Gate<O> {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization: Option<&str> = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Invalid Authorization header encoding");
                ApiError::Unauthenticated {
                    reason: String::from("Authorization header is not valid text"),
                }
            })?),
            None => None,
        };

        let mut persistence = state.lock_persistence().await?;
        let principal: Principal = AccessGate::new(&state.codec)
            .check(authorization, O::OPERATION, &mut *persistence)
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::Internal {
                message: format!("operation '{}' is public", O::OPERATION),
            })?;

        Ok(Self(principal, PhantomData))
    }
}
