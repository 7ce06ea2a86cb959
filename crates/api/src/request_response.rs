// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire. Monetary amounts are integer
//! cents.

use autolot::Principal;
use autolot_persistence::{CustomerData, OrderDetailData, VehicleData};
use time::OffsetDateTime;

use crate::error::ApiError;

/// The envelope wrapping every response body.
///
/// Business errors travel in `code` and `message` with HTTP status 200.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse<T> {
    /// `0` on success, otherwise the error code.
    pub code: i32,
    /// A human-readable message.
    pub message: String,
    /// The payload, `null` on failure.
    pub data: Option<T>,
    /// Milliseconds since the Unix epoch when the response was built.
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: String::from("OK"),
            data: Some(data),
            timestamp: now_millis(),
        }
    }

    /// Wraps an error.
    #[must_use]
    pub fn failure(err: &ApiError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            data: None,
            timestamp: now_millis(),
        }
    }
}

fn now_millis() -> i64 {
    i64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The exact username.
    pub username: String,
    /// The plaintext password.
    pub password: String,
}

/// Public view of a principal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub real_name: String,
    pub role: String,
}

impl From<&Principal> for UserInfo {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            username: principal.username.clone(),
            real_name: principal.real_name.clone(),
            role: principal.role.to_string(),
        }
    }
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The bearer credential.
    pub token: String,
    /// The logged-in principal.
    pub user_info: UserInfo,
}

/// API request to sell a vehicle.
///
/// The selling principal is never part of the request; it comes from the
/// access gate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: i64,
    pub vehicle_id: i64,
    /// The agreed price, in cents.
    pub actual_price: i64,
    /// The list price, in cents.
    #[serde(default)]
    pub original_price: Option<i64>,
    /// The discount granted, in cents.
    #[serde(default)]
    pub discount_amount: Option<i64>,
    /// The business date of the sale (`YYYY-MM-DD`).
    pub order_date: String,
    #[serde(default)]
    pub remark: Option<String>,
}

/// An order joined with salesperson, customer and vehicle details.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub actual_price: i64,
    pub original_price: Option<i64>,
    pub discount_amount: Option<i64>,
    pub order_date: String,
    pub remark: Option<String>,
    pub create_time: String,
    pub sales_id: i64,
    pub sales_name: String,
    pub sales_phone: Option<String>,
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_id_card: Option<String>,
    pub car_id: i64,
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub year: i32,
}

impl From<OrderDetailData> for OrderDetailResponse {
    fn from(detail: OrderDetailData) -> Self {
        Self {
            id: detail.order_id,
            order_number: detail.order_number,
            status: detail.status.to_string(),
            actual_price: detail.actual_price.cents(),
            original_price: detail.original_price.map(|m| m.cents()),
            discount_amount: detail.discount_amount.map(|m| m.cents()),
            order_date: detail.order_date,
            remark: detail.remark,
            create_time: detail.created_at,
            sales_id: detail.sales_principal_id,
            sales_name: detail.salesperson_name,
            sales_phone: detail.salesperson_phone,
            customer_id: detail.customer_id,
            customer_name: detail.customer_name,
            customer_phone: detail.customer_phone,
            customer_id_card: detail.customer_id_card,
            car_id: detail.vehicle_id,
            vin: detail.vin,
            brand: detail.brand,
            model: detail.model,
            color: detail.color,
            year: detail.model_year,
        }
    }
}

/// API request to add a vehicle to inventory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub vin: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub color: Option<String>,
    pub year: i32,
    /// The list price, in cents.
    pub price: i64,
}

/// API request to change a vehicle's descriptive fields. Absent fields
/// keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// The list price, in cents.
    #[serde(default)]
    pub price: Option<i64>,
}

/// API request to move a vehicle between `AVAILABLE` and `LOCKED`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateVehicleStatusRequest {
    /// The target status.
    pub status: String,
}

/// A vehicle as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i64,
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub year: i32,
    pub price: i64,
    pub status: String,
    pub create_time: String,
}

impl From<VehicleData> for VehicleResponse {
    fn from(vehicle: VehicleData) -> Self {
        Self {
            id: vehicle.vehicle_id,
            vin: vehicle.vin,
            brand: vehicle.brand,
            model: vehicle.model,
            color: vehicle.color,
            year: vehicle.model_year,
            price: vehicle.price.cents(),
            status: vehicle.status.to_string(),
            create_time: vehicle.created_at,
        }
    }
}

/// API request to register a customer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub id_card: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// API request to change a customer. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// A blank value clears the id card.
    #[serde(default)]
    pub id_card: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A customer as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub id_card: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub create_time: String,
}

impl From<CustomerData> for CustomerResponse {
    fn from(customer: CustomerData) -> Self {
        Self {
            id: customer.customer_id,
            name: customer.name,
            phone: customer.phone,
            id_card: customer.id_card,
            gender: customer.gender,
            address: customer.address,
            create_time: customer.created_at,
        }
    }
}

/// API response for the health check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Always `UP` while the server answers.
    pub status: String,
}
