// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot::{InventoryLedger, Reservation, SalesLedger};
use autolot_domain::{Money, VehicleStatus};

use crate::error::PersistenceError;
use crate::tests::{create_test_vehicle, seed};
use crate::{GuardedWrite, NewVehicleData, Persistence, VehicleData};

fn reserve(persistence: &mut Persistence, vehicle_id: i64) -> Reservation {
    persistence
        .in_transaction(|tx| Ok(tx.try_reserve(vehicle_id)?))
        .unwrap()
}

#[test]
fn test_new_vehicle_is_available() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1hgcm82633a004352"))
        .unwrap();

    let vehicle: VehicleData = persistence.get_vehicle(id).unwrap().unwrap();

    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert_eq!(vehicle.vin, "1HGCM82633A004352");
    assert_eq!(vehicle.price, Money::from_cents(2_500_000));
}

#[test]
fn test_duplicate_vin_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    let result = persistence.create_vehicle(&create_test_vehicle("1HGCM82633A004352"));

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_reservation_is_a_compare_and_set() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    assert_eq!(reserve(&mut persistence, id), Reservation::Reserved);
    assert_eq!(
        reserve(&mut persistence, id),
        Reservation::NotAvailable(VehicleStatus::Sold)
    );
    assert_eq!(reserve(&mut persistence, 999_999), Reservation::NotFound);
}

#[test]
fn test_locked_vehicle_cannot_be_reserved() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    assert_eq!(
        persistence
            .update_vehicle_status(id, VehicleStatus::Locked)
            .unwrap(),
        GuardedWrite::Applied
    );
    assert_eq!(
        reserve(&mut persistence, id),
        Reservation::NotAvailable(VehicleStatus::Locked)
    );
}

#[test]
fn test_rollback_reservation_inside_transaction() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    persistence
        .in_transaction(|tx| {
            tx.try_reserve(id)?;
            tx.rollback_reservation(id)?;
            Ok(())
        })
        .unwrap();

    assert_eq!(
        persistence.get_vehicle(id).unwrap().unwrap().status,
        VehicleStatus::Available
    );
}

#[test]
fn test_delete_unsold_vehicle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    assert_eq!(
        persistence.delete_vehicle(id).unwrap(),
        GuardedWrite::Applied
    );
    assert!(persistence.get_vehicle(id).unwrap().is_none());
    assert_eq!(
        persistence.delete_vehicle(id).unwrap(),
        GuardedWrite::NotFound
    );
}

#[test]
fn test_sold_vehicle_cannot_be_deleted_or_relisted() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    reserve(&mut persistence, seed.vehicle_id);

    assert_eq!(
        persistence.delete_vehicle(seed.vehicle_id).unwrap(),
        GuardedWrite::Sold
    );
    assert_eq!(
        persistence
            .update_vehicle_status(seed.vehicle_id, VehicleStatus::Available)
            .unwrap(),
        GuardedWrite::Sold
    );
    assert_eq!(
        persistence
            .get_vehicle(seed.vehicle_id)
            .unwrap()
            .unwrap()
            .status,
        VehicleStatus::Sold
    );
}

#[test]
fn test_status_update_cannot_sell() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    assert!(
        persistence
            .update_vehicle_status(id, VehicleStatus::Sold)
            .is_err()
    );
    assert_eq!(
        persistence.get_vehicle(id).unwrap().unwrap().status,
        VehicleStatus::Available
    );
}

#[test]
fn test_status_update_to_same_status_is_applied() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    assert_eq!(
        persistence
            .update_vehicle_status(id, VehicleStatus::Available)
            .unwrap(),
        GuardedWrite::Applied
    );
    assert_eq!(
        persistence
            .update_vehicle_status(404, VehicleStatus::Locked)
            .unwrap(),
        GuardedWrite::NotFound
    );
}

#[test]
fn test_vehicle_status_lookup() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);

    assert_eq!(
        persistence.get_vehicle_status(seed.vehicle_id).unwrap(),
        Some(VehicleStatus::Available)
    );
    reserve(&mut persistence, seed.vehicle_id);
    assert_eq!(
        persistence.get_vehicle_status(seed.vehicle_id).unwrap(),
        Some(VehicleStatus::Sold)
    );
    assert_eq!(persistence.get_vehicle_status(404).unwrap(), None);
}

#[test]
fn test_update_vehicle_keeps_status() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    reserve(&mut persistence, seed.vehicle_id);
    let mut changed: NewVehicleData = create_test_vehicle("JH4KA7561PC008269");
    changed.color = Some(String::from("Black"));
    changed.price = Money::from_cents(2_300_000);

    assert!(
        persistence
            .update_vehicle(seed.vehicle_id, &changed)
            .unwrap()
    );

    let vehicle: VehicleData = persistence.get_vehicle(seed.vehicle_id).unwrap().unwrap();
    assert_eq!(vehicle.vin, "JH4KA7561PC008269");
    assert_eq!(vehicle.color.as_deref(), Some("Black"));
    assert_eq!(vehicle.price, Money::from_cents(2_300_000));
    assert_eq!(vehicle.status, VehicleStatus::Sold);
}

#[test]
fn test_update_vehicle_with_unchanged_values_is_applied() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let vehicle: NewVehicleData = create_test_vehicle("1HGCM82633A004352");
    let id: i64 = persistence.create_vehicle(&vehicle).unwrap();

    assert!(persistence.update_vehicle(id, &vehicle).unwrap());
    assert!(!persistence.update_vehicle(404, &vehicle).unwrap());
}

#[test]
fn test_update_vehicle_to_taken_vin_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();
    let id: i64 = persistence
        .create_vehicle(&create_test_vehicle("JH4KA7561PC008269"))
        .unwrap();

    let result = persistence.update_vehicle(id, &create_test_vehicle("1HGCM82633A004352"));

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
    assert_eq!(
        persistence.get_vehicle(id).unwrap().unwrap().vin,
        "JH4KA7561PC008269"
    );
}
