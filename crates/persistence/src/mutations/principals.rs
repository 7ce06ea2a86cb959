// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Principal mutations.
//!
//! Principal administration is outside the service's HTTP surface; these
//! exist for startup bootstrap and for tests that change a principal behind
//! an issued credential.

use autolot_domain::Role;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::principals;
use crate::error::PersistenceError;
use crate::mutations::now_timestamp;

backend_fn! {
/// Creates a new, enabled principal.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The unique login name, stored as given
/// * `real_name` - The display name
/// * `phone` - Optional contact phone
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The role
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the username is taken,
/// or another error if hashing or the insert fails.
pub fn create_principal(
    conn: &mut _,
    username: &str,
    real_name: &str,
    phone: Option<&str>,
    password: &str,
    role: Role,
) -> Result<i64, PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(principals::table)
        .values((
            principals::username.eq(username),
            principals::password_hash.eq(&password_hash),
            principals::real_name.eq(real_name),
            principals::phone.eq(phone),
            principals::role.eq(role.as_str()),
            principals::is_enabled.eq(1),
            principals::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    let principal_id: i64 = conn.get_last_insert_rowid()?;

    info!(principal_id, username, role = %role, "Principal created");

    Ok(principal_id)
}
}

backend_fn! {
/// Enables or disables a principal.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such principal exists.
pub fn set_principal_enabled(
    conn: &mut _,
    principal_id: i64,
    enabled: bool,
) -> Result<(), PersistenceError> {
    info!(principal_id, enabled, "Changing principal enabled flag");

    let updated: usize = diesel::update(principals::table)
        .filter(principals::principal_id.eq(principal_id))
        .set(principals::is_enabled.eq(i32::from(enabled)))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Principal {principal_id}")));
    }
    Ok(())
}
}

backend_fn! {
/// Changes a principal's role.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such principal exists.
pub fn set_principal_role(
    conn: &mut _,
    principal_id: i64,
    role: Role,
) -> Result<(), PersistenceError> {
    info!(principal_id, role = %role, "Changing principal role");

    let updated: usize = diesel::update(principals::table)
        .filter(principals::principal_id.eq(principal_id))
        .set(principals::role.eq(role.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Principal {principal_id}")));
    }
    Ok(())
}
}
