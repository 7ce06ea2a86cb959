// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order creation against a real database.

use autolot::{CompletedSale, SaleError, create_order, create_order_with_number};
use autolot_domain::{Money, OrderNumber, OrderStatus, VehicleStatus};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;
use crate::tests::{create_test_request, create_test_vehicle, seed};

const FIXED_NOW: OffsetDateTime = datetime!(2026-03-14 10:30:00.250 UTC);

fn assert_no_sale_recorded(persistence: &mut Persistence, vehicle_id: i64) {
    assert_eq!(
        persistence.get_vehicle(vehicle_id).unwrap().unwrap().status,
        VehicleStatus::Available
    );
    assert_eq!(
        persistence
            .count_orders_for_vehicle(vehicle_id, OrderStatus::Completed)
            .unwrap(),
        0
    );
}

#[test]
fn test_successful_sale_marks_vehicle_sold() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let request = create_test_request(seed.customer_id, seed.vehicle_id);

    let sale: CompletedSale = create_order(&mut persistence, &seed.seller, &request).unwrap();

    assert!(sale.order_id > 0);
    assert_eq!(sale.order.status, OrderStatus::Completed);
    assert_eq!(sale.order.sales_principal_id, seed.seller.id);
    assert!(sale.order.order_number.value().starts_with("ORD"));
    assert_eq!(
        persistence
            .get_vehicle(seed.vehicle_id)
            .unwrap()
            .unwrap()
            .status,
        VehicleStatus::Sold
    );
    assert_eq!(
        persistence
            .count_orders_for_vehicle(seed.vehicle_id, OrderStatus::Completed)
            .unwrap(),
        1
    );
}

#[test]
fn test_second_sale_of_same_vehicle_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let request = create_test_request(seed.customer_id, seed.vehicle_id);

    create_order(&mut persistence, &seed.seller, &request).unwrap();
    let result = create_order(&mut persistence, &seed.seller, &request);

    assert_eq!(
        result,
        Err(SaleError::VehicleNotSellable {
            vehicle_id: seed.vehicle_id,
            status: VehicleStatus::Sold,
        })
    );
    assert_eq!(
        persistence
            .count_orders_for_vehicle(seed.vehicle_id, OrderStatus::Completed)
            .unwrap(),
        1
    );
}

#[test]
fn test_unknown_vehicle_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let request = create_test_request(seed.customer_id, 9_999);

    let result = create_order(&mut persistence, &seed.seller, &request);

    assert_eq!(result, Err(SaleError::VehicleNotFound(9_999)));
}

#[test]
fn test_unknown_customer_leaves_vehicle_available() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let request = create_test_request(8_888, seed.vehicle_id);

    let result = create_order(&mut persistence, &seed.seller, &request);

    assert_eq!(result, Err(SaleError::CustomerNotFound(8_888)));
    assert_no_sale_recorded(&mut persistence, seed.vehicle_id);
}

#[test]
fn test_locked_vehicle_is_not_sellable() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    persistence
        .update_vehicle_status(seed.vehicle_id, VehicleStatus::Locked)
        .unwrap();
    let request = create_test_request(seed.customer_id, seed.vehicle_id);

    let result = create_order(&mut persistence, &seed.seller, &request);

    assert_eq!(
        result,
        Err(SaleError::VehicleNotSellable {
            vehicle_id: seed.vehicle_id,
            status: VehicleStatus::Locked,
        })
    );
}

#[test]
fn test_invalid_price_touches_nothing() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let mut request = create_test_request(seed.customer_id, seed.vehicle_id);
    request.actual_price = Money::ZERO;

    let result = create_order(&mut persistence, &seed.seller, &request);

    assert!(matches!(result, Err(SaleError::InvalidInput(_))));
    assert_no_sale_recorded(&mut persistence, seed.vehicle_id);
}

#[test]
fn test_duplicate_order_number_rolls_back_reservation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let second_vehicle: i64 = persistence
        .create_vehicle(&create_test_vehicle("JH4KA8260MC000000"))
        .unwrap();
    let number = OrderNumber::generate(FIXED_NOW, 42);

    create_order_with_number(
        &mut persistence,
        &seed.seller,
        &create_test_request(seed.customer_id, seed.vehicle_id),
        number.clone(),
        FIXED_NOW,
    )
    .unwrap();

    let result = create_order_with_number(
        &mut persistence,
        &seed.seller,
        &create_test_request(seed.customer_id, second_vehicle),
        number.clone(),
        FIXED_NOW,
    );

    assert_eq!(
        result,
        Err(SaleError::DuplicateOrderNumber(number.value().to_string()))
    );
    assert_no_sale_recorded(&mut persistence, second_vehicle);
}

#[test]
fn test_completed_order_implies_sold_vehicle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let mut vehicles: Vec<i64> = vec![seed.vehicle_id];
    for vin in ["JH4KA8260MC000001", "JH4KA8260MC000002"] {
        vehicles.push(persistence.create_vehicle(&create_test_vehicle(vin)).unwrap());
    }

    for (attempt, vehicle_id) in vehicles.iter().chain(vehicles.iter()).enumerate() {
        let _ = create_order_with_number(
            &mut persistence,
            &seed.seller,
            &create_test_request(seed.customer_id, *vehicle_id),
            OrderNumber::generate(FIXED_NOW, u32::try_from(attempt).unwrap()),
            FIXED_NOW,
        );
    }

    for vehicle_id in vehicles {
        let completed: i64 = persistence
            .count_orders_for_vehicle(vehicle_id, OrderStatus::Completed)
            .unwrap();
        let status = persistence.get_vehicle(vehicle_id).unwrap().unwrap().status;
        assert_eq!(completed, 1, "vehicle {vehicle_id} sold exactly once");
        assert_eq!(status, VehicleStatus::Sold);
    }
}
