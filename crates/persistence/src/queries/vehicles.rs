// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vehicle queries.
//!
//! Vehicle status is never cached; every call reads the committed row.

use std::str::FromStr;

use autolot_domain::{Money, VehicleStatus};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::VehicleData;
use crate::diesel_schema::vehicles;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = vehicles)]
struct VehicleRow {
    vehicle_id: i64,
    vin: String,
    brand: String,
    model: String,
    color: Option<String>,
    model_year: i32,
    price_cents: i64,
    status: String,
    created_at: String,
}

impl TryFrom<VehicleRow> for VehicleData {
    type Error = PersistenceError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_id: row.vehicle_id,
            vin: row.vin,
            brand: row.brand,
            model: row.model,
            color: row.color,
            model_year: row.model_year,
            price: Money::from_cents(row.price_cents),
            status: VehicleStatus::from_str(&row.status)?,
            created_at: row.created_at,
        })
    }
}

backend_fn! {
/// Retrieves a vehicle by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is
/// unknown.
pub fn get_vehicle(
    conn: &mut _,
    vehicle_id: i64,
) -> Result<Option<VehicleData>, PersistenceError> {
    vehicles::table
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .select(VehicleRow::as_select())
        .first::<VehicleRow>(conn)
        .optional()?
        .map(VehicleData::try_from)
        .transpose()
}
}

backend_fn! {
/// Reads the current status of a vehicle.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is
/// unknown. Returns `Ok(None)` if the vehicle does not exist.
pub fn get_vehicle_status(
    conn: &mut _,
    vehicle_id: i64,
) -> Result<Option<VehicleStatus>, PersistenceError> {
    let status: Option<String> = vehicles::table
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .select(vehicles::status)
        .first(conn)
        .optional()?;

    Ok(status.as_deref().map(VehicleStatus::from_str).transpose()?)
}
}

/// Reads the latest committed status of a vehicle and locks the row.
///
/// Under `REPEATABLE READ` a plain `SELECT` inside a transaction reads the
/// snapshot taken by the first read of that transaction, which can predate
/// a competing sale's commit. A locking read always sees the newest row.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is
/// unknown. Returns `Ok(None)` if the vehicle does not exist.
pub fn get_vehicle_status_for_update_mysql(
    conn: &mut MysqlConnection,
    vehicle_id: i64,
) -> Result<Option<VehicleStatus>, PersistenceError> {
    let status: Option<String> = vehicles::table
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .select(vehicles::status)
        .for_update()
        .first(conn)
        .optional()?;

    Ok(status.as_deref().map(VehicleStatus::from_str).transpose()?)
}

/// Status lookup callable from backend-agnostic mutation bodies.
///
/// Mutations call this only to explain a guarded write that matched no
/// row, so it must report the committed state rather than a snapshot.
pub(crate) trait VehicleStatusLookup {
    fn vehicle_status(&mut self, vehicle_id: i64)
    -> Result<Option<VehicleStatus>, PersistenceError>;
}

impl VehicleStatusLookup for SqliteConnection {
    fn vehicle_status(
        &mut self,
        vehicle_id: i64,
    ) -> Result<Option<VehicleStatus>, PersistenceError> {
        get_vehicle_status_sqlite(self, vehicle_id)
    }
}

impl VehicleStatusLookup for MysqlConnection {
    fn vehicle_status(
        &mut self,
        vehicle_id: i64,
    ) -> Result<Option<VehicleStatus>, PersistenceError> {
        get_vehicle_status_for_update_mysql(self, vehicle_id)
    }
}
