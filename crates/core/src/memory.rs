// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process sales ledger.
//!
//! Each primitive takes the shared lock for exactly one read-modify-write,
//! so reservation is a compare-and-set on the vehicle's status. There is no
//! transaction to roll back: a failed sale is undone through
//! [`InventoryLedger::rollback_reservation`].

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use autolot_domain::VehicleStatus;

use crate::error::{SaleError, StoreError};
use crate::ledger::{InventoryLedger, OrderRecords, Reservation, SalesLedger};
use crate::order::NewOrder;

#[derive(Debug, Default)]
struct MemoryState {
    vehicles: HashMap<i64, VehicleStatus>,
    customers: HashSet<i64>,
    orders: Vec<(i64, NewOrder)>,
    fail_inserts: bool,
}

/// A cloneable, thread-safe in-memory ledger.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::Failure(format!("Ledger lock poisoned: {e}")))
    }

    /// Adds or replaces a vehicle.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger lock is poisoned.
    pub fn put_vehicle(&self, vehicle_id: i64, status: VehicleStatus) -> Result<(), StoreError> {
        self.lock()?.vehicles.insert(vehicle_id, status);
        Ok(())
    }

    /// Adds a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger lock is poisoned.
    pub fn put_customer(&self, customer_id: i64) -> Result<(), StoreError> {
        self.lock()?.customers.insert(customer_id);
        Ok(())
    }

    /// Makes every subsequent order insert fail until cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger lock is poisoned.
    pub fn set_fail_inserts(&self, fail: bool) -> Result<(), StoreError> {
        self.lock()?.fail_inserts = fail;
        Ok(())
    }

    /// Returns the current status of a vehicle.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger lock is poisoned.
    pub fn vehicle_status(&self, vehicle_id: i64) -> Result<Option<VehicleStatus>, StoreError> {
        Ok(self.lock()?.vehicles.get(&vehicle_id).copied())
    }

    /// Returns every stored order with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger lock is poisoned.
    pub fn orders(&self) -> Result<Vec<(i64, NewOrder)>, StoreError> {
        Ok(self.lock()?.orders.clone())
    }
}

impl InventoryLedger for MemoryLedger {
    fn try_reserve(&mut self, vehicle_id: i64) -> Result<Reservation, StoreError> {
        let mut state = self.lock()?;
        match state.vehicles.get_mut(&vehicle_id) {
            None => Ok(Reservation::NotFound),
            Some(status) if status.is_sellable() => {
                *status = VehicleStatus::Sold;
                Ok(Reservation::Reserved)
            }
            Some(status) => Ok(Reservation::NotAvailable(*status)),
        }
    }

    fn rollback_reservation(&mut self, vehicle_id: i64) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if let Some(status) = state.vehicles.get_mut(&vehicle_id)
            && *status == VehicleStatus::Sold
        {
            *status = VehicleStatus::Available;
        }
        drop(state);
        Ok(())
    }
}

impl OrderRecords for MemoryLedger {
    fn customer_exists(&mut self, customer_id: i64) -> Result<bool, StoreError> {
        Ok(self.lock()?.customers.contains(&customer_id))
    }

    fn insert_order(&mut self, order: &NewOrder) -> Result<i64, StoreError> {
        let mut state = self.lock()?;
        if state.fail_inserts {
            return Err(StoreError::Failure(String::from(
                "Order inserts are disabled",
            )));
        }
        if state
            .orders
            .iter()
            .any(|(_, existing)| existing.order_number == order.order_number)
        {
            return Err(StoreError::Conflict(format!(
                "order_number {}",
                order.order_number
            )));
        }
        let id: i64 = i64::try_from(state.orders.len())
            .map_err(|e| StoreError::Failure(e.to_string()))?
            + 1;
        state.orders.push((id, order.clone()));
        drop(state);
        Ok(id)
    }
}

impl SalesLedger for MemoryLedger {
    type Tx<'a>
        = Self
    where
        Self: 'a;

    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, SaleError>
    where
        F: FnOnce(&mut Self::Tx<'_>) -> Result<T, SaleError>,
    {
        f(self)
    }
}
