// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer queries.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::CustomerData;
use crate::diesel_schema::customers;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = customers)]
struct CustomerRow {
    customer_id: i64,
    name: String,
    phone: String,
    id_card: Option<String>,
    gender: Option<String>,
    address: Option<String>,
    created_at: String,
}

impl From<CustomerRow> for CustomerData {
    fn from(row: CustomerRow) -> Self {
        Self {
            customer_id: row.customer_id,
            name: row.name,
            phone: row.phone,
            id_card: row.id_card,
            gender: row.gender,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

backend_fn! {
/// Retrieves a customer by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_customer(
    conn: &mut _,
    customer_id: i64,
) -> Result<Option<CustomerData>, PersistenceError> {
    Ok(customers::table
        .filter(customers::customer_id.eq(customer_id))
        .select(CustomerRow::as_select())
        .first::<CustomerRow>(conn)
        .optional()?
        .map(CustomerData::from))
}
}

backend_fn! {
/// Returns whether a customer with this ID exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn customer_exists(conn: &mut _, customer_id: i64) -> Result<bool, PersistenceError> {
    Ok(diesel::select(exists(
        customers::table.filter(customers::customer_id.eq(customer_id)),
    ))
    .get_result(conn)?)
}
}

backend_fn! {
/// Retrieves the customer registered under a phone number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_customer_by_phone(
    conn: &mut _,
    phone: &str,
) -> Result<Option<CustomerData>, PersistenceError> {
    Ok(customers::table
        .filter(customers::phone.eq(phone))
        .select(CustomerRow::as_select())
        .first::<CustomerRow>(conn)
        .optional()?
        .map(CustomerData::from))
}
}
