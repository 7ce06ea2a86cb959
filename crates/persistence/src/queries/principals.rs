// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Principal queries.

use std::str::FromStr;

use autolot_domain::Role;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::PrincipalData;
use crate::diesel_schema::principals;
use crate::error::PersistenceError;

/// Diesel Queryable struct for principal rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = principals)]
struct PrincipalRow {
    principal_id: i64,
    username: String,
    password_hash: String,
    real_name: String,
    phone: Option<String>,
    role: String,
    is_enabled: i32,
    created_at: String,
}

impl TryFrom<PrincipalRow> for PrincipalData {
    type Error = PersistenceError;

    fn try_from(row: PrincipalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            principal_id: row.principal_id,
            username: row.username,
            password_hash: row.password_hash,
            real_name: row.real_name,
            phone: row.phone,
            role: Role::from_str(&row.role)?,
            is_enabled: row.is_enabled != 0,
            created_at: row.created_at,
        })
    }
}

backend_fn! {
/// Retrieves a principal by exact username.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored role is
/// unknown. Returns `Ok(None)` if the principal is not found.
pub fn get_principal_by_username(
    conn: &mut _,
    username: &str,
) -> Result<Option<PrincipalData>, PersistenceError> {
    debug!(username, "Looking up principal by username");

    principals::table
        .filter(principals::username.eq(username))
        .select(PrincipalRow::as_select())
        .first::<PrincipalRow>(conn)
        .optional()?
        .map(PrincipalData::try_from)
        .transpose()
}
}

backend_fn! {
/// Retrieves a principal by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored role is
/// unknown. Returns `Ok(None)` if the principal is not found.
pub fn get_principal_by_id(
    conn: &mut _,
    principal_id: i64,
) -> Result<Option<PrincipalData>, PersistenceError> {
    debug!(principal_id, "Looking up principal by ID");

    principals::table
        .filter(principals::principal_id.eq(principal_id))
        .select(PrincipalRow::as_select())
        .first::<PrincipalRow>(conn)
        .optional()?
        .map(PrincipalData::try_from)
        .transpose()
}
}

backend_fn! {
/// Counts all principals, enabled or not.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_principals(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(principals::table.count().get_result(conn)?)
}
}

/// Verifies a plain-text password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}

backend_fn! {
/// Lists the enabled principals holding `role`, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored role is
/// unknown.
pub fn list_enabled_principals_by_role(
    conn: &mut _,
    role: Role,
) -> Result<Vec<PrincipalData>, PersistenceError> {
    principals::table
        .filter(principals::role.eq(role.as_str()))
        .filter(principals::is_enabled.eq(1))
        .order(principals::principal_id.asc())
        .select(PrincipalRow::as_select())
        .load::<PrincipalRow>(conn)?
        .into_iter()
        .map(PrincipalData::try_from)
        .collect()
}
}
