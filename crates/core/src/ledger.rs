// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator traits consumed by the order transaction manager.
//!
//! The manager never touches storage directly. It runs inside a
//! [`SalesLedger`] transaction and talks to the transaction handle through
//! [`InventoryLedger`] and [`OrderRecords`].

use autolot_domain::VehicleStatus;

use crate::error::{SaleError, StoreError};
use crate::order::NewOrder;

/// Outcome of a reservation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// The vehicle was `AVAILABLE` and is now `SOLD`.
    Reserved,
    /// No vehicle with that id exists.
    NotFound,
    /// The vehicle exists but was not `AVAILABLE`.
    NotAvailable(VehicleStatus),
}

/// Owner of vehicle availability state.
pub trait InventoryLedger {
    /// Atomically flips the vehicle from `AVAILABLE` to `SOLD`.
    ///
    /// Implementations must guarantee that of any number of concurrent
    /// callers racing on the same id, at most one observes
    /// [`Reservation::Reserved`]. The current committed status must be
    /// consulted on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn try_reserve(&mut self, vehicle_id: i64) -> Result<Reservation, StoreError>;

    /// Reverts a reservation made by [`InventoryLedger::try_reserve`].
    ///
    /// Transactional stores get this for free from rollback; stores that
    /// reserve outside a transaction rely on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn rollback_reservation(&mut self, vehicle_id: i64) -> Result<(), StoreError>;
}

/// Order-side records touched by a sale.
pub trait OrderRecords {
    /// Returns whether a customer with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn customer_exists(&mut self, customer_id: i64) -> Result<bool, StoreError>;

    /// Inserts a new order and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the order number is already taken,
    /// or [`StoreError::Failure`] for anything else.
    fn insert_order(&mut self, order: &NewOrder) -> Result<i64, StoreError>;
}

/// A store able to run a sale as one atomic unit.
pub trait SalesLedger {
    /// The handle a sale talks to while the transaction is open.
    type Tx<'a>: InventoryLedger + OrderRecords
    where
        Self: 'a;

    /// Runs `f` inside a transaction.
    ///
    /// The transaction commits only if `f` returns `Ok`. Any error rolls
    /// back every write `f` made, reservations included.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or
    /// [`SaleError::PersistenceFailure`] if the transaction itself could
    /// not be opened or committed.
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, SaleError>
    where
        F: FnOnce(&mut Self::Tx<'_>) -> Result<T, SaleError>;
}
