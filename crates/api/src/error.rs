// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use autolot::{SaleError, StoreError};
use autolot_domain::{DomainError, Role};
use autolot_persistence::PersistenceError;

use crate::credential::CredentialError;
use crate::operations::Operation;

/// Reasons the access gate refuses an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// No usable credential, or the principal behind it is gone or disabled.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    /// The principal's current role may not invoke the operation.
    #[error("Role {role} may not perform '{operation}'")]
    Forbidden {
        /// The operation that was refused.
        operation: Operation,
        /// The principal's current role.
        role: Role,
    },
    /// The principal store could not be consulted.
    #[error("Principal lookup failed: {0}")]
    Store(StoreError),
}

impl From<CredentialError> for GateError {
    fn from(err: CredentialError) -> Self {
        Self::Unauthenticated(err.to_string())
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Every variant carries a stable numeric code, see [`ApiError::code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Login was refused: unknown user, wrong password, or disabled.
    LoginFailed,
    /// The request carried no valid credential.
    Unauthenticated {
        /// Why the credential was refused.
        reason: String,
    },
    /// Authorization failed: the principal does not have permission.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role the principal holds.
        role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested vehicle or order was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The vehicle is locked or sold.
    VehicleNotSellable {
        /// A human-readable description.
        message: String,
    },
    /// Another customer already holds this phone number or id card.
    DuplicateCustomer {
        /// The conflicting field, `phone` or `idCard`.
        field: String,
        /// The conflicting value.
        value: String,
    },
    /// A vehicle with this VIN is already registered.
    DuplicateVin {
        /// The conflicting VIN.
        vin: String,
    },
    /// Orders reference the customer, so it cannot be deleted.
    CustomerHasOrders {
        /// The customer that was targeted.
        customer_id: i64,
    },
    /// Sold vehicles cannot be deleted.
    VehicleSold {
        /// The vehicle that was targeted.
        vehicle_id: i64,
    },
    /// The customer referenced by an order does not exist.
    CustomerNotFound {
        /// The missing customer.
        customer_id: i64,
    },
    /// A uniqueness constraint rejected the write.
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// The store failed, or another internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the numeric code surfaced in the response envelope.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::LoginFailed => 1001,
            Self::Unauthenticated { .. } => 1002,
            Self::Forbidden { .. } => 1003,
            Self::InvalidInput { .. } => 2002,
            Self::ResourceNotFound { .. } => 3001,
            Self::VehicleNotSellable { .. } => 3002,
            Self::DuplicateCustomer { .. } => 3003,
            Self::DuplicateVin { .. } => 3004,
            Self::CustomerHasOrders { .. } => 3005,
            Self::VehicleSold { .. } => 3006,
            Self::CustomerNotFound { .. } => 3007,
            Self::Conflict { .. } => 4001,
            Self::Internal { .. } => 5004,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoginFailed => write!(f, "Invalid username or password"),
            Self::Unauthenticated { reason } => write!(f, "Not logged in: {reason}"),
            Self::Forbidden { action, role } => {
                write!(
                    f,
                    "Insufficient permission: '{action}' is not allowed for {role}"
                )
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::VehicleNotSellable { message } => write!(f, "Vehicle not sellable: {message}"),
            Self::DuplicateCustomer { field, value } => {
                write!(f, "A customer with {field} {value} already exists")
            }
            Self::DuplicateVin { vin } => write!(f, "VIN {vin} already exists"),
            Self::CustomerHasOrders { customer_id } => {
                write!(f, "Customer {customer_id} has orders and cannot be deleted")
            }
            Self::VehicleSold { vehicle_id } => {
                write!(f, "Vehicle {vehicle_id} is sold and cannot be deleted")
            }
            Self::CustomerNotFound { customer_id } => {
                write!(f, "Customer {customer_id} does not exist")
            }
            Self::Conflict { message } => write!(f, "Uniqueness conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthenticated(reason) => Self::Unauthenticated { reason },
            GateError::Forbidden { operation, role } => Self::Forbidden {
                action: operation.name().to_string(),
                role: role.to_string(),
            },
            GateError::Store(err) => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: err.field().to_string(),
        message: err.to_string(),
    }
}

/// Translates an order-creation error into an API error.
#[must_use]
pub fn translate_sale_error(err: SaleError) -> ApiError {
    match err {
        SaleError::InvalidInput(domain_err) => translate_domain_error(&domain_err),
        SaleError::VehicleNotFound(vehicle_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Vehicle"),
            message: format!("Vehicle {vehicle_id} does not exist"),
        },
        SaleError::VehicleNotSellable { vehicle_id, status } => ApiError::VehicleNotSellable {
            message: format!("Vehicle {vehicle_id} is {status}"),
        },
        SaleError::CustomerNotFound(customer_id) => ApiError::CustomerNotFound { customer_id },
        SaleError::DuplicateOrderNumber(number) => ApiError::Conflict {
            message: format!("Order number {number} already exists, please retry"),
        },
        SaleError::PersistenceFailure(message) => ApiError::Internal { message },
    }
}

/// Translates a persistence error into an API error.
///
/// Callers that know which unique column a write touches should map
/// `UniqueViolation` themselves before falling back to this.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(message) => ApiError::Conflict { message },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
