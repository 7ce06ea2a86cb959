// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sales order mutations.

use autolot::NewOrder;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use time::macros::format_description;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::sales_orders;
use crate::error::PersistenceError;
use crate::mutations::format_timestamp;

backend_fn! {
/// Inserts an order row and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the order number is
/// already taken, or another error if the insert fails.
pub fn insert_order(conn: &mut _, order: &NewOrder) -> Result<i64, PersistenceError> {
    let order_date: String = order
        .order_date
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| PersistenceError::Other(format!("Failed to format order date: {e}")))?;

    diesel::insert_into(sales_orders::table)
        .values((
            sales_orders::order_number.eq(order.order_number.value()),
            sales_orders::sales_principal_id.eq(order.sales_principal_id),
            sales_orders::customer_id.eq(order.customer_id),
            sales_orders::vehicle_id.eq(order.vehicle_id),
            sales_orders::actual_price_cents.eq(order.actual_price.cents()),
            sales_orders::original_price_cents.eq(order.original_price.map(|m| m.cents())),
            sales_orders::discount_amount_cents.eq(order.discount_amount.map(|m| m.cents())),
            sales_orders::order_date.eq(&order_date),
            sales_orders::status.eq(order.status.as_str()),
            sales_orders::remark.eq(order.remark.as_deref()),
            sales_orders::created_at.eq(format_timestamp(order.created_at)?),
        ))
        .execute(conn)?;

    let order_id: i64 = conn.get_last_insert_rowid()?;
    debug!(order_id, order_number = %order.order_number, "Order row inserted");
    Ok(order_id)
}
}
