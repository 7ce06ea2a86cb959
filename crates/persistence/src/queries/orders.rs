// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sales order queries.

use std::str::FromStr;

use autolot_domain::{Money, OrderStatus};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::OrderDetailData;
use crate::diesel_schema::{customers, principals, sales_orders, vehicles};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = sales_orders)]
struct OrderRow {
    order_id: i64,
    order_number: String,
    sales_principal_id: i64,
    customer_id: i64,
    vehicle_id: i64,
    actual_price_cents: i64,
    original_price_cents: Option<i64>,
    discount_amount_cents: Option<i64>,
    order_date: String,
    status: String,
    remark: Option<String>,
    created_at: String,
}

type SalespersonColumns = (String, Option<String>);
type CustomerColumns = (String, String, Option<String>);
type VehicleColumns = (String, String, String, Option<String>, i32);

backend_fn! {
/// Retrieves an order joined with its salesperson, customer and vehicle.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored status is
/// unknown. Returns `Ok(None)` if the order does not exist.
pub fn get_order_detail(
    conn: &mut _,
    order_id: i64,
) -> Result<Option<OrderDetailData>, PersistenceError> {
    let row: Option<(OrderRow, SalespersonColumns, CustomerColumns, VehicleColumns)> =
        sales_orders::table
            .inner_join(principals::table)
            .inner_join(customers::table)
            .inner_join(vehicles::table)
            .filter(sales_orders::order_id.eq(order_id))
            .select((
                OrderRow::as_select(),
                (principals::real_name, principals::phone),
                (customers::name, customers::phone, customers::id_card),
                (
                    vehicles::vin,
                    vehicles::brand,
                    vehicles::model,
                    vehicles::color,
                    vehicles::model_year,
                ),
            ))
            .first(conn)
            .optional()?;

    let Some((order, salesperson, customer, vehicle)) = row else {
        return Ok(None);
    };

    Ok(Some(OrderDetailData {
        order_id: order.order_id,
        order_number: order.order_number,
        status: OrderStatus::from_str(&order.status)?,
        actual_price: Money::from_cents(order.actual_price_cents),
        original_price: order.original_price_cents.map(Money::from_cents),
        discount_amount: order.discount_amount_cents.map(Money::from_cents),
        order_date: order.order_date,
        remark: order.remark,
        created_at: order.created_at,
        sales_principal_id: order.sales_principal_id,
        salesperson_name: salesperson.0,
        salesperson_phone: salesperson.1,
        customer_id: order.customer_id,
        customer_name: customer.0,
        customer_phone: customer.1,
        customer_id_card: customer.2,
        vehicle_id: order.vehicle_id,
        vin: vehicle.0,
        brand: vehicle.1,
        model: vehicle.2,
        color: vehicle.3,
        model_year: vehicle.4,
    }))
}
}

backend_fn! {
/// Counts orders with the given status that reference a vehicle.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_orders_for_vehicle(
    conn: &mut _,
    vehicle_id: i64,
    status: OrderStatus,
) -> Result<i64, PersistenceError> {
    Ok(sales_orders::table
        .filter(sales_orders::vehicle_id.eq(vehicle_id))
        .filter(sales_orders::status.eq(status.as_str()))
        .count()
        .get_result(conn)?)
}
}
