// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot_domain::VehicleStatus;

use crate::tests::helpers::{VEHICLE_ID, create_test_ledger};
use crate::{InventoryLedger, MemoryLedger, Reservation};

#[test]
fn test_reserve_flips_available_to_sold() {
    let mut ledger: MemoryLedger = create_test_ledger();

    assert_eq!(
        ledger.try_reserve(VEHICLE_ID).unwrap(),
        Reservation::Reserved
    );
    assert_eq!(
        ledger.vehicle_status(VEHICLE_ID).unwrap(),
        Some(VehicleStatus::Sold)
    );
}

#[test]
fn test_second_reservation_observes_sold() {
    let mut ledger: MemoryLedger = create_test_ledger();

    ledger.try_reserve(VEHICLE_ID).unwrap();
    assert_eq!(
        ledger.try_reserve(VEHICLE_ID).unwrap(),
        Reservation::NotAvailable(VehicleStatus::Sold)
    );
}

#[test]
fn test_locked_vehicle_is_not_reserved() {
    let mut ledger: MemoryLedger = create_test_ledger();
    ledger.put_vehicle(8, VehicleStatus::Locked).unwrap();

    assert_eq!(
        ledger.try_reserve(8).unwrap(),
        Reservation::NotAvailable(VehicleStatus::Locked)
    );
    assert_eq!(
        ledger.vehicle_status(8).unwrap(),
        Some(VehicleStatus::Locked)
    );
}

#[test]
fn test_unknown_vehicle_is_not_found() {
    let mut ledger: MemoryLedger = create_test_ledger();
    assert_eq!(ledger.try_reserve(999_999).unwrap(), Reservation::NotFound);
}

#[test]
fn test_rollback_reservation_restores_available() {
    let mut ledger: MemoryLedger = create_test_ledger();

    ledger.try_reserve(VEHICLE_ID).unwrap();
    ledger.rollback_reservation(VEHICLE_ID).unwrap();

    assert_eq!(
        ledger.vehicle_status(VEHICLE_ID).unwrap(),
        Some(VehicleStatus::Available)
    );
    assert_eq!(
        ledger.try_reserve(VEHICLE_ID).unwrap(),
        Reservation::Reserved
    );
}

#[test]
fn test_rollback_reservation_leaves_locked_vehicle_alone() {
    let mut ledger: MemoryLedger = create_test_ledger();
    ledger.put_vehicle(8, VehicleStatus::Locked).unwrap();

    ledger.rollback_reservation(8).unwrap();

    assert_eq!(
        ledger.vehicle_status(8).unwrap(),
        Some(VehicleStatus::Locked)
    );
}
