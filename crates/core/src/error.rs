// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot_domain::{DomainError, VehicleStatus};

/// Errors reported by a record store backing the core traits.
///
/// Stores classify their own failures into these two buckets; the core
/// decides what a conflict means for the operation in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    Conflict(String),
    /// Any other failure: I/O, timeouts, lock contention, broken connections.
    Failure(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(msg) => write!(f, "Uniqueness conflict: {msg}"),
            Self::Failure(msg) => write!(f, "Store failure: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors that terminate an order-creation call.
///
/// Every variant means the enclosing transaction was rolled back and no
/// order or reservation was left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// The request carried invalid sale data.
    InvalidInput(DomainError),
    /// The vehicle id does not exist.
    VehicleNotFound(i64),
    /// The vehicle exists but is locked or already sold.
    VehicleNotSellable {
        /// The vehicle that could not be reserved.
        vehicle_id: i64,
        /// The status observed when the reservation failed.
        status: VehicleStatus,
    },
    /// The customer id does not exist.
    CustomerNotFound(i64),
    /// The generated order number collided with an existing order.
    DuplicateOrderNumber(String),
    /// The store failed for a reason not otherwise classified.
    PersistenceFailure(String),
}

impl std::fmt::Display for SaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "Invalid sale: {err}"),
            Self::VehicleNotFound(id) => write!(f, "Vehicle {id} not found"),
            Self::VehicleNotSellable { vehicle_id, status } => {
                write!(
                    f,
                    "Vehicle {vehicle_id} is not available for sale ({status})"
                )
            }
            Self::CustomerNotFound(id) => write!(f, "Customer {id} not found"),
            Self::DuplicateOrderNumber(number) => {
                write!(f, "Order number {number} already exists")
            }
            Self::PersistenceFailure(msg) => write!(f, "Persistence failure: {msg}"),
        }
    }
}

impl std::error::Error for SaleError {}

impl From<DomainError> for SaleError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err)
    }
}

// A conflict outside of the order insert has no sale-specific meaning.
impl From<StoreError> for SaleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) | StoreError::Failure(msg) => Self::PersistenceFailure(msg),
        }
    }
}
