// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer mutations.

use diesel::dsl::{exists, not};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{CustomerRemoval, NewCustomerData};
use crate::diesel_schema::{customers, sales_orders};
use crate::error::PersistenceError;
use crate::mutations::now_timestamp;

backend_fn! {
/// Inserts a customer and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the phone number or the
/// id card is already registered.
pub fn create_customer(
    conn: &mut _,
    customer: &NewCustomerData,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(customers::table)
        .values((
            customers::name.eq(&customer.name),
            customers::phone.eq(&customer.phone),
            customers::id_card.eq(customer.id_card.as_deref()),
            customers::gender.eq(customer.gender.as_deref()),
            customers::address.eq(customer.address.as_deref()),
            customers::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    let customer_id: i64 = conn.get_last_insert_rowid()?;
    info!(customer_id, "Customer created");
    Ok(customer_id)
}
}

backend_fn! {
/// Overwrites every editable field of a customer.
///
/// Returns `false` if no customer with this ID exists.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the phone number or the
/// id card belongs to another customer.
pub fn update_customer(
    conn: &mut _,
    customer_id: i64,
    customer: &NewCustomerData,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(customers::table)
        .filter(customers::customer_id.eq(customer_id))
        .set((
            customers::name.eq(&customer.name),
            customers::phone.eq(&customer.phone),
            customers::id_card.eq(customer.id_card.as_deref()),
            customers::gender.eq(customer.gender.as_deref()),
            customers::address.eq(customer.address.as_deref()),
        ))
        .execute(conn)?;

    if updated == 1 {
        info!(customer_id, "Customer updated");
        return Ok(true);
    }

    // MySQL reports zero affected rows when no value changed.
    Ok(diesel::select(exists(
        customers::table.filter(customers::customer_id.eq(customer_id)),
    ))
    .get_result(conn)?)
}
}

backend_fn! {
/// Deletes a customer that no order references.
///
/// The order check is part of the `DELETE` itself, so a customer is never
/// removed out from under an order.
///
/// # Errors
///
/// Returns an error if the database statement fails.
pub fn delete_customer(
    conn: &mut _,
    customer_id: i64,
) -> Result<CustomerRemoval, PersistenceError> {
    let deleted: usize = diesel::delete(
        customers::table
            .filter(customers::customer_id.eq(customer_id))
            .filter(not(exists(
                sales_orders::table.filter(sales_orders::customer_id.eq(customer_id)),
            ))),
    )
    .execute(conn)?;

    if deleted == 1 {
        info!(customer_id, "Customer deleted");
        return Ok(CustomerRemoval::Removed);
    }

    let found: bool = diesel::select(exists(
        customers::table.filter(customers::customer_id.eq(customer_id)),
    ))
    .get_result(conn)?;
    Ok(if found {
        CustomerRemoval::HasOrders
    } else {
        CustomerRemoval::NotFound
    })
}
}
