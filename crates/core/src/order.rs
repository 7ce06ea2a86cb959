// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The order transaction manager: the single write path that sells a vehicle.

use autolot_domain::{Money, OrderNumber, OrderStatus, validate_sale_prices};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::{SaleError, StoreError};
use crate::ledger::{InventoryLedger, OrderRecords, Reservation, SalesLedger};
use crate::principal::Principal;

/// A request to sell one vehicle to one customer.
///
/// The selling principal is not part of the request; it always comes from
/// the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// The buying customer.
    pub customer_id: i64,
    /// The vehicle being sold.
    pub vehicle_id: i64,
    /// The agreed price.
    pub actual_price: Money,
    /// The list price, if recorded.
    pub original_price: Option<Money>,
    /// The discount granted, if any.
    pub discount_amount: Option<Money>,
    /// The business date of the sale.
    pub order_date: Date,
    /// Free-form note.
    pub remark: Option<String>,
}

/// An order row as written by a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub sales_principal_id: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub actual_price: Money,
    pub original_price: Option<Money>,
    pub discount_amount: Option<Money>,
    pub order_date: Date,
    pub status: OrderStatus,
    pub remark: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A committed sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSale {
    /// Store-assigned id of the new order.
    pub order_id: i64,
    /// The order as written.
    pub order: NewOrder,
}

/// Sells a vehicle, generating a fresh order number.
///
/// See [`create_order_with_number`] for the transaction semantics.
///
/// # Errors
///
/// Returns an error if the sale is rejected or the store fails.
pub fn create_order<L: SalesLedger>(
    ledger: &mut L,
    seller: &Principal,
    request: &OrderRequest,
) -> Result<CompletedSale, SaleError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let order_number: OrderNumber = OrderNumber::generate(now, rand::random::<u32>());
    create_order_with_number(ledger, seller, request, order_number, now)
}

/// Sells a vehicle under a caller-supplied order number.
///
/// Inside one transaction this checks the customer, reserves the vehicle
/// (`AVAILABLE -> SOLD`) and inserts a `COMPLETED` order stamped with the
/// seller's id. If anything fails after the reservation, the reservation is
/// explicitly reverted before the transaction is rolled back, so ledgers
/// without real transactions end up in the same state as ones with them.
///
/// # Arguments
///
/// * `ledger` - The store to sell against
/// * `seller` - The principal resolved by the access gate
/// * `request` - The sale details
/// * `order_number` - The number to give the new order
/// * `now` - The creation timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The prices are invalid
/// - The customer does not exist
/// - The vehicle does not exist, or is locked or sold
/// - The order number is already taken
/// - The store fails at any point
pub fn create_order_with_number<L: SalesLedger>(
    ledger: &mut L,
    seller: &Principal,
    request: &OrderRequest,
    order_number: OrderNumber,
    now: OffsetDateTime,
) -> Result<CompletedSale, SaleError> {
    validate_sale_prices(
        request.actual_price,
        request.original_price,
        request.discount_amount,
    )?;

    let order: NewOrder = NewOrder {
        order_number,
        sales_principal_id: seller.id,
        customer_id: request.customer_id,
        vehicle_id: request.vehicle_id,
        actual_price: request.actual_price,
        original_price: request.original_price,
        discount_amount: request.discount_amount,
        order_date: request.order_date,
        status: OrderStatus::Completed,
        remark: request.remark.clone(),
        created_at: now,
    };

    let result: Result<CompletedSale, SaleError> =
        ledger.in_transaction(|tx| sell_within(tx, order));

    match &result {
        Ok(sale) => info!(
            order_id = sale.order_id,
            order_number = %sale.order.order_number,
            vehicle_id = sale.order.vehicle_id,
            seller = %seller.username,
            "Order created"
        ),
        Err(e) => warn!(
            vehicle_id = request.vehicle_id,
            customer_id = request.customer_id,
            seller = %seller.username,
            error = %e,
            "Order creation rejected"
        ),
    }

    result
}

fn sell_within<T: InventoryLedger + OrderRecords>(
    tx: &mut T,
    order: NewOrder,
) -> Result<CompletedSale, SaleError> {
    if !tx.customer_exists(order.customer_id)? {
        return Err(SaleError::CustomerNotFound(order.customer_id));
    }

    match tx.try_reserve(order.vehicle_id)? {
        Reservation::Reserved => {
            debug!(vehicle_id = order.vehicle_id, "Vehicle reserved");
        }
        Reservation::NotFound => return Err(SaleError::VehicleNotFound(order.vehicle_id)),
        Reservation::NotAvailable(status) => {
            return Err(SaleError::VehicleNotSellable {
                vehicle_id: order.vehicle_id,
                status,
            });
        }
    }

    match tx.insert_order(&order) {
        Ok(order_id) => Ok(CompletedSale { order_id, order }),
        Err(e) => {
            if let Err(rollback_err) = tx.rollback_reservation(order.vehicle_id) {
                warn!(
                    vehicle_id = order.vehicle_id,
                    error = %rollback_err,
                    "Failed to revert reservation; relying on transaction rollback"
                );
            }
            Err(match e {
                StoreError::Conflict(_) => {
                    SaleError::DuplicateOrderNumber(order.order_number.value().to_string())
                }
                StoreError::Failure(msg) => SaleError::PersistenceFailure(msg),
            })
        }
    }
}
