// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot::Principal;
use autolot_domain::{Money, OrderStatus, Role, VehicleStatus, Vin};

/// A stored principal, including its credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalData {
    pub principal_id: i64,
    pub username: String,
    pub password_hash: String,
    pub real_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_enabled: bool,
    pub created_at: String,
}

impl PrincipalData {
    /// Strips the credential hash, leaving the principal the core works with.
    #[must_use]
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.principal_id,
            username: self.username.clone(),
            real_name: self.real_name.clone(),
            phone: self.phone.clone(),
            role: self.role,
            enabled: self.is_enabled,
        }
    }
}

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerData {
    pub customer_id: i64,
    pub name: String,
    pub phone: String,
    pub id_card: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
}

/// The editable fields of a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomerData {
    pub name: String,
    pub phone: String,
    pub id_card: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

/// Outcome of deleting a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerRemoval {
    /// The customer was deleted.
    Removed,
    /// No customer with that id exists.
    NotFound,
    /// Orders reference the customer, so it was kept.
    HasOrders,
}

/// A stored vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleData {
    pub vehicle_id: i64,
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub model_year: i32,
    pub price: Money,
    pub status: VehicleStatus,
    pub created_at: String,
}

/// The descriptive fields of a vehicle.
///
/// New vehicles always start `AVAILABLE`; updates never touch the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicleData {
    pub vin: Vin,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub model_year: i32,
    pub price: Money,
}

/// Outcome of a write that refuses to touch sold vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedWrite {
    /// The write was applied.
    Applied,
    /// No vehicle with that id exists.
    NotFound,
    /// The vehicle is sold and was left untouched.
    Sold,
}

/// An order joined with the descriptive fields of its salesperson,
/// customer, and vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetailData {
    pub order_id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub actual_price: Money,
    pub original_price: Option<Money>,
    pub discount_amount: Option<Money>,
    pub order_date: String,
    pub remark: Option<String>,
    pub created_at: String,
    pub sales_principal_id: i64,
    pub salesperson_name: String,
    pub salesperson_phone: Option<String>,
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_id_card: Option<String>,
    pub vehicle_id: i64,
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub model_year: i32,
}
