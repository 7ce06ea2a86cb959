// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vehicle mutations.
//!
//! `SOLD` is terminal. Every statement here that could move a vehicle out
//! of `SOLD` carries a `status` guard in its `WHERE` clause, and the only
//! statement that moves a vehicle into `SOLD` requires it to be `AVAILABLE`.

use autolot::Reservation;
use autolot_domain::VehicleStatus;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{GuardedWrite, NewVehicleData};
use crate::diesel_schema::vehicles;
use crate::error::PersistenceError;
use crate::mutations::now_timestamp;
use crate::queries::vehicles::VehicleStatusLookup;

backend_fn! {
/// Inserts a vehicle in `AVAILABLE` state and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the VIN already exists.
pub fn create_vehicle(conn: &mut _, vehicle: &NewVehicleData) -> Result<i64, PersistenceError> {
    diesel::insert_into(vehicles::table)
        .values((
            vehicles::vin.eq(vehicle.vin.value()),
            vehicles::brand.eq(&vehicle.brand),
            vehicles::model.eq(&vehicle.model),
            vehicles::color.eq(vehicle.color.as_deref()),
            vehicles::model_year.eq(vehicle.model_year),
            vehicles::price_cents.eq(vehicle.price.cents()),
            vehicles::status.eq(VehicleStatus::Available.as_str()),
            vehicles::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    let vehicle_id: i64 = conn.get_last_insert_rowid()?;
    info!(vehicle_id, vin = %vehicle.vin, "Vehicle created");
    Ok(vehicle_id)
}
}

backend_fn! {
/// Flips a vehicle from `AVAILABLE` to `SOLD` with a single guarded update.
///
/// Two callers racing on the same vehicle cannot both match the
/// `status = 'AVAILABLE'` predicate: the loser either blocks on the
/// winner's lock and then matches nothing, or sees the committed `SOLD`.
///
/// # Errors
///
/// Returns an error if the database statement fails.
pub fn reserve_vehicle(conn: &mut _, vehicle_id: i64) -> Result<Reservation, PersistenceError> {
    let updated: usize = diesel::update(vehicles::table)
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .filter(vehicles::status.eq(VehicleStatus::Available.as_str()))
        .set(vehicles::status.eq(VehicleStatus::Sold.as_str()))
        .execute(conn)?;

    if updated == 1 {
        debug!(vehicle_id, "Reservation applied");
        return Ok(Reservation::Reserved);
    }

    Ok(match conn.vehicle_status(vehicle_id)? {
        None => Reservation::NotFound,
        Some(status) => Reservation::NotAvailable(status),
    })
}
}

backend_fn! {
/// Reverts a reservation: `SOLD` back to `AVAILABLE`.
///
/// Only called while the sale that made the reservation is still open.
///
/// # Errors
///
/// Returns an error if the database statement fails.
pub fn release_vehicle(conn: &mut _, vehicle_id: i64) -> Result<(), PersistenceError> {
    diesel::update(vehicles::table)
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .filter(vehicles::status.eq(VehicleStatus::Sold.as_str()))
        .set(vehicles::status.eq(VehicleStatus::Available.as_str()))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes a vehicle unless it is sold.
///
/// # Errors
///
/// Returns an error if the database statement fails.
pub fn delete_vehicle(conn: &mut _, vehicle_id: i64) -> Result<GuardedWrite, PersistenceError> {
    let deleted: usize = diesel::delete(
        vehicles::table
            .filter(vehicles::vehicle_id.eq(vehicle_id))
            .filter(vehicles::status.ne(VehicleStatus::Sold.as_str())),
    )
    .execute(conn)?;

    if deleted == 1 {
        info!(vehicle_id, "Vehicle deleted");
        return Ok(GuardedWrite::Applied);
    }

    Ok(match conn.vehicle_status(vehicle_id)? {
        None => GuardedWrite::NotFound,
        Some(_) => GuardedWrite::Sold,
    })
}
}

backend_fn! {
/// Moves an unsold vehicle between `AVAILABLE` and `LOCKED`.
///
/// Callers must not pass `SOLD`; selling goes through reservation only.
///
/// # Errors
///
/// Returns an error if `status` is `SOLD` or the database statement fails.
pub fn update_vehicle_status(
    conn: &mut _,
    vehicle_id: i64,
    status: VehicleStatus,
) -> Result<GuardedWrite, PersistenceError> {
    if status == VehicleStatus::Sold {
        return Err(PersistenceError::Other(String::from(
            "Vehicles can only become SOLD through a sale",
        )));
    }

    let updated: usize = diesel::update(vehicles::table)
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .filter(vehicles::status.ne(VehicleStatus::Sold.as_str()))
        .set(vehicles::status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 1 {
        info!(vehicle_id, status = %status, "Vehicle status changed");
        return Ok(GuardedWrite::Applied);
    }

    // MySQL reports zero affected rows when the status is already `status`.
    Ok(match conn.vehicle_status(vehicle_id)? {
        None => GuardedWrite::NotFound,
        Some(VehicleStatus::Sold) => GuardedWrite::Sold,
        Some(_) => GuardedWrite::Applied,
    })
}
}

backend_fn! {
/// Overwrites the descriptive fields of a vehicle.
///
/// The status column is never written here, so a sold vehicle keeps its
/// status. Returns `false` if no vehicle with this ID exists.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the VIN belongs to
/// another vehicle.
pub fn update_vehicle(
    conn: &mut _,
    vehicle_id: i64,
    vehicle: &NewVehicleData,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(vehicles::table)
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .set((
            vehicles::vin.eq(vehicle.vin.value()),
            vehicles::brand.eq(&vehicle.brand),
            vehicles::model.eq(&vehicle.model),
            vehicles::color.eq(vehicle.color.as_deref()),
            vehicles::model_year.eq(vehicle.model_year),
            vehicles::price_cents.eq(vehicle.price.cents()),
        ))
        .execute(conn)?;

    if updated == 1 {
        info!(vehicle_id, vin = %vehicle.vin, "Vehicle updated");
        return Ok(true);
    }

    // MySQL reports zero affected rows when no value changed.
    Ok(conn.vehicle_status(vehicle_id)?.is_some())
}
}
