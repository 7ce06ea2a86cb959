// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Handlers assume the access gate already admitted the caller; the
//! resolved principal is passed in for attribution only.

use std::str::FromStr;

use autolot::{CompletedSale, OrderRequest, Principal, create_order as sell_vehicle};
use autolot_domain::{
    Money, VehicleStatus, Vin, parse_order_date, validate_customer_fields, validate_vehicle_fields,
};
use autolot_persistence::{
    CustomerData, CustomerRemoval, GuardedWrite, NewCustomerData, NewVehicleData, Persistence,
    PersistenceError, VehicleData,
};
use tracing::info;

use crate::auth::AuthenticationService;
use crate::credential::CredentialCodec;
use crate::error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_sale_error,
};
use crate::request_response::{
    CreateCustomerRequest, CreateOrderRequest, CreateVehicleRequest, CustomerResponse,
    HealthResponse, LoginRequest, LoginResponse, OrderDetailResponse, UpdateCustomerRequest,
    UpdateVehicleRequest, UpdateVehicleStatusRequest, UserInfo, VehicleResponse,
};

/// Reports that the service is up.
#[must_use]
pub fn health() -> HealthResponse {
    HealthResponse {
        status: String::from("UP"),
    }
}

/// Logs a principal in and issues a credential.
///
/// # Errors
///
/// Returns `ApiError::LoginFailed` if the credentials are refused.
pub fn login(
    persistence: &mut Persistence,
    codec: &CredentialCodec,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (token, principal) =
        AuthenticationService::login(persistence, codec, &request.username, &request.password)?;
    Ok(LoginResponse {
        token,
        user_info: UserInfo::from(&principal),
    })
}

/// Returns the principal resolved by the access gate.
#[must_use]
pub fn current_principal(principal: &Principal) -> UserInfo {
    UserInfo::from(principal)
}

/// Lists the enabled salespersons an order can be attributed to.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub fn list_salespersons(persistence: &mut Persistence) -> Result<Vec<UserInfo>, ApiError> {
    Ok(persistence
        .list_salespersons()
        .map_err(translate_persistence_error)?
        .iter()
        .map(|data| UserInfo::from(&data.to_principal()))
        .collect())
}

/// Sells a vehicle and returns the new order's detail view.
///
/// # Errors
///
/// Returns an error if the input is invalid, the vehicle or customer does
/// not exist, the vehicle is not sellable, or the store fails. No order or
/// reservation persists on error.
pub fn create_order(
    persistence: &mut Persistence,
    principal: &Principal,
    request: &CreateOrderRequest,
) -> Result<OrderDetailResponse, ApiError> {
    let order_request: OrderRequest = OrderRequest {
        customer_id: request.customer_id,
        vehicle_id: request.vehicle_id,
        actual_price: Money::from_cents(request.actual_price),
        original_price: request.original_price.map(Money::from_cents),
        discount_amount: request.discount_amount.map(Money::from_cents),
        order_date: parse_order_date(&request.order_date)
            .map_err(|e| translate_domain_error(&e))?,
        remark: request.remark.clone(),
    };

    let sale: CompletedSale =
        sell_vehicle(persistence, principal, &order_request).map_err(translate_sale_error)?;

    // The read model is assembled after commit.
    get_order(persistence, sale.order_id)
}

/// Retrieves an order's detail view.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the order does not exist.
pub fn get_order(
    persistence: &mut Persistence,
    order_id: i64,
) -> Result<OrderDetailResponse, ApiError> {
    persistence
        .get_order_detail(order_id)
        .map_err(translate_persistence_error)?
        .map(OrderDetailResponse::from)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("Order {order_id} does not exist"),
        })
}

/// Registers a customer.
///
/// # Errors
///
/// Returns an error if the fields are invalid or the phone number or id
/// card is taken.
pub fn create_customer(
    persistence: &mut Persistence,
    principal: &Principal,
    request: &CreateCustomerRequest,
) -> Result<CustomerResponse, ApiError> {
    let customer: NewCustomerData = NewCustomerData {
        name: request.name.trim().to_string(),
        phone: request.phone.trim().to_string(),
        id_card: non_blank(request.id_card.as_deref()),
        gender: request.gender.clone(),
        address: request.address.clone(),
    };
    validate_customer_fields(&customer.name, &customer.phone)
        .map_err(|e| translate_domain_error(&e))?;

    let customer_id: i64 = match persistence.create_customer(&customer) {
        Ok(id) => id,
        Err(err) => return Err(customer_write_error(persistence, None, &customer, err)),
    };

    info!(customer_id, registered_by = %principal.username, "Customer registered");

    persistence
        .get_customer(customer_id)
        .map_err(translate_persistence_error)?
        .map(CustomerResponse::from)
        .ok_or_else(|| ApiError::Internal {
            message: format!("Customer {customer_id} vanished after insert"),
        })
}

/// Retrieves a customer.
///
/// # Errors
///
/// Returns `ApiError::CustomerNotFound` if the customer does not exist.
pub fn get_customer(
    persistence: &mut Persistence,
    customer_id: i64,
) -> Result<CustomerResponse, ApiError> {
    find_customer(persistence, customer_id).map(CustomerResponse::from)
}

/// Changes the fields present in the request, keeping the others.
///
/// A blank `idCard` clears the stored id card.
///
/// # Errors
///
/// Returns `ApiError::CustomerNotFound` if the customer does not exist,
/// `ApiError::InvalidInput` if the merged fields are invalid, or
/// `ApiError::DuplicateCustomer` if the phone number or id card belongs to
/// another customer.
pub fn update_customer(
    persistence: &mut Persistence,
    principal: &Principal,
    customer_id: i64,
    request: &UpdateCustomerRequest,
) -> Result<CustomerResponse, ApiError> {
    let current: CustomerData = find_customer(persistence, customer_id)?;

    let customer: NewCustomerData = NewCustomerData {
        name: request
            .name
            .as_deref()
            .map_or(current.name, |name| name.trim().to_string()),
        phone: request
            .phone
            .as_deref()
            .map_or(current.phone, |phone| phone.trim().to_string()),
        id_card: match request.id_card.as_deref() {
            Some(id_card) => non_blank(Some(id_card)),
            None => current.id_card,
        },
        gender: request.gender.clone().or(current.gender),
        address: request.address.clone().or(current.address),
    };
    validate_customer_fields(&customer.name, &customer.phone)
        .map_err(|e| translate_domain_error(&e))?;

    match persistence.update_customer(customer_id, &customer) {
        Ok(true) => {}
        Ok(false) => return Err(ApiError::CustomerNotFound { customer_id }),
        Err(err) => {
            return Err(customer_write_error(
                persistence,
                Some(customer_id),
                &customer,
                err,
            ));
        }
    }

    info!(customer_id, updated_by = %principal.username, "Customer updated");
    get_customer(persistence, customer_id)
}

/// Deletes a customer that no order references.
///
/// # Errors
///
/// Returns `ApiError::CustomerNotFound` if the customer does not exist, or
/// `ApiError::CustomerHasOrders` if an order references it.
pub fn delete_customer(
    persistence: &mut Persistence,
    principal: &Principal,
    customer_id: i64,
) -> Result<(), ApiError> {
    match persistence
        .delete_customer(customer_id)
        .map_err(translate_persistence_error)?
    {
        CustomerRemoval::Removed => {
            info!(customer_id, deleted_by = %principal.username, "Customer deleted");
            Ok(())
        }
        CustomerRemoval::NotFound => Err(ApiError::CustomerNotFound { customer_id }),
        CustomerRemoval::HasOrders => Err(ApiError::CustomerHasOrders { customer_id }),
    }
}

/// Adds a vehicle to inventory in `AVAILABLE` state.
///
/// # Errors
///
/// Returns an error if the fields are invalid or the VIN is taken.
pub fn create_vehicle(
    persistence: &mut Persistence,
    principal: &Principal,
    request: &CreateVehicleRequest,
) -> Result<VehicleResponse, ApiError> {
    let vin: Vin = Vin::new(&request.vin).map_err(|e| translate_domain_error(&e))?;
    let price: Money = Money::from_cents(request.price);
    validate_vehicle_fields(&request.brand, &request.model, request.year, price)
        .map_err(|e| translate_domain_error(&e))?;

    let vehicle: NewVehicleData = NewVehicleData {
        vin: vin.clone(),
        brand: request.brand.trim().to_string(),
        model: request.model.trim().to_string(),
        color: request.color.clone(),
        model_year: request.year,
        price,
    };

    let vehicle_id: i64 = persistence
        .create_vehicle(&vehicle)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => ApiError::DuplicateVin {
                vin: vin.to_string(),
            },
            other => translate_persistence_error(other),
        })?;

    info!(vehicle_id, created_by = %principal.username, "Vehicle added to inventory");
    get_vehicle(persistence, vehicle_id)
}

/// Retrieves a vehicle.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vehicle does not exist.
pub fn get_vehicle(
    persistence: &mut Persistence,
    vehicle_id: i64,
) -> Result<VehicleResponse, ApiError> {
    persistence
        .get_vehicle(vehicle_id)
        .map_err(translate_persistence_error)?
        .map(VehicleResponse::from)
        .ok_or_else(|| vehicle_not_found(vehicle_id))
}

/// Deletes a vehicle that has not been sold.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vehicle does not exist, or
/// `ApiError::VehicleSold` if it is sold.
pub fn delete_vehicle(
    persistence: &mut Persistence,
    principal: &Principal,
    vehicle_id: i64,
) -> Result<(), ApiError> {
    match persistence
        .delete_vehicle(vehicle_id)
        .map_err(translate_persistence_error)?
    {
        GuardedWrite::Applied => {
            info!(vehicle_id, deleted_by = %principal.username, "Vehicle deleted");
            Ok(())
        }
        GuardedWrite::NotFound => Err(vehicle_not_found(vehicle_id)),
        GuardedWrite::Sold => Err(ApiError::VehicleSold { vehicle_id }),
    }
}

/// Moves an unsold vehicle between `AVAILABLE` and `LOCKED`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the target status is unknown or
/// `SOLD`, `ApiError::ResourceNotFound` if the vehicle does not exist, or
/// `ApiError::VehicleNotSellable` if it is already sold.
pub fn update_vehicle_status(
    persistence: &mut Persistence,
    principal: &Principal,
    vehicle_id: i64,
    request: &UpdateVehicleStatusRequest,
) -> Result<VehicleResponse, ApiError> {
    let status: VehicleStatus =
        VehicleStatus::from_str(&request.status).map_err(|e| translate_domain_error(&e))?;
    if status == VehicleStatus::Sold {
        return Err(ApiError::InvalidInput {
            field: String::from("status"),
            message: String::from("vehicles only become SOLD through a sale"),
        });
    }

    match persistence
        .update_vehicle_status(vehicle_id, status)
        .map_err(translate_persistence_error)?
    {
        GuardedWrite::Applied => {
            info!(
                vehicle_id,
                status = %status,
                changed_by = %principal.username,
                "Vehicle status updated"
            );
            get_vehicle(persistence, vehicle_id)
        }
        GuardedWrite::NotFound => Err(vehicle_not_found(vehicle_id)),
        GuardedWrite::Sold => Err(ApiError::VehicleNotSellable {
            message: format!("Vehicle {vehicle_id} is SOLD"),
        }),
    }
}

/// Changes the descriptive fields present in the request, keeping the
/// others. The status is never changed here.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vehicle does not exist,
/// `ApiError::InvalidInput` if the merged fields are invalid, or
/// `ApiError::DuplicateVin` if the VIN belongs to another vehicle.
pub fn update_vehicle(
    persistence: &mut Persistence,
    principal: &Principal,
    vehicle_id: i64,
    request: &UpdateVehicleRequest,
) -> Result<VehicleResponse, ApiError> {
    let current: VehicleData = persistence
        .get_vehicle(vehicle_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| vehicle_not_found(vehicle_id))?;

    let vin: Vin = Vin::new(request.vin.as_deref().unwrap_or(&current.vin))
        .map_err(|e| translate_domain_error(&e))?;
    let vehicle: NewVehicleData = NewVehicleData {
        vin: vin.clone(),
        brand: request
            .brand
            .as_deref()
            .map_or(current.brand, |brand| brand.trim().to_string()),
        model: request
            .model
            .as_deref()
            .map_or(current.model, |model| model.trim().to_string()),
        color: request.color.clone().or(current.color),
        model_year: request.year.unwrap_or(current.model_year),
        price: request.price.map_or(current.price, Money::from_cents),
    };
    validate_vehicle_fields(
        &vehicle.brand,
        &vehicle.model,
        vehicle.model_year,
        vehicle.price,
    )
    .map_err(|e| translate_domain_error(&e))?;

    let updated: bool = persistence
        .update_vehicle(vehicle_id, &vehicle)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => ApiError::DuplicateVin {
                vin: vin.to_string(),
            },
            other => translate_persistence_error(other),
        })?;
    if !updated {
        return Err(vehicle_not_found(vehicle_id));
    }

    info!(vehicle_id, vin = %vin, updated_by = %principal.username, "Vehicle updated");
    get_vehicle(persistence, vehicle_id)
}

fn find_customer(
    persistence: &mut Persistence,
    customer_id: i64,
) -> Result<CustomerData, ApiError> {
    persistence
        .get_customer(customer_id)
        .map_err(translate_persistence_error)?
        .ok_or(ApiError::CustomerNotFound { customer_id })
}

/// Maps a failed customer write, naming the field another customer holds.
///
/// A unique violation on a phone number that belongs to someone else is a
/// phone conflict; any other unique violation is the id card.
fn customer_write_error(
    persistence: &mut Persistence,
    customer_id: Option<i64>,
    customer: &NewCustomerData,
    err: PersistenceError,
) -> ApiError {
    if !matches!(err, PersistenceError::UniqueViolation(_)) {
        return translate_persistence_error(err);
    }

    let phone_holder: Option<i64> = match persistence.get_customer_by_phone(&customer.phone) {
        Ok(holder) => holder.map(|c| c.customer_id),
        Err(lookup_err) => return translate_persistence_error(lookup_err),
    };
    match (&customer.id_card, phone_holder) {
        (Some(id_card), holder) if holder.is_none() || holder == customer_id => {
            ApiError::DuplicateCustomer {
                field: String::from("idCard"),
                value: id_card.clone(),
            }
        }
        _ => ApiError::DuplicateCustomer {
            field: String::from("phone"),
            value: customer.phone.clone(),
        },
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn vehicle_not_found(vehicle_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Vehicle"),
        message: format!("Vehicle {vehicle_id} does not exist"),
    }
}
