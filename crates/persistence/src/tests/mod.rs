// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod customer_tests;
mod initialization_tests;
mod sale_tests;
mod vehicle_tests;

use autolot::{OrderRequest, Principal};
use autolot_domain::{Money, Role, Vin};
use time::macros::date;

use crate::{NewCustomerData, NewVehicleData, Persistence};

pub const TEST_PASSWORD: &str = "correct horse battery";

/// Rows created by [`seed`].
pub struct Seed {
    pub seller: Principal,
    pub customer_id: i64,
    pub vehicle_id: i64,
}

pub fn create_test_vehicle(vin: &str) -> NewVehicleData {
    NewVehicleData {
        vin: Vin::new(vin).unwrap(),
        brand: String::from("Toyota"),
        model: String::from("Camry"),
        color: Some(String::from("Silver")),
        model_year: 2025,
        price: Money::from_cents(2_500_000),
    }
}

pub fn create_test_customer(phone: &str) -> NewCustomerData {
    NewCustomerData {
        name: String::from("Li Wei"),
        phone: phone.to_string(),
        id_card: Some(format!("1101011990{phone}")),
        gender: Some(String::from("M")),
        address: None,
    }
}

pub fn create_test_request(customer_id: i64, vehicle_id: i64) -> OrderRequest {
    OrderRequest {
        customer_id,
        vehicle_id,
        actual_price: Money::from_cents(2_400_000),
        original_price: Some(Money::from_cents(2_500_000)),
        discount_amount: Some(Money::from_cents(100_000)),
        order_date: date!(2026 - 03 - 14),
        remark: None,
    }
}

/// Creates an admin, a salesperson, one customer, and one available vehicle.
pub fn seed(persistence: &mut Persistence) -> Seed {
    persistence
        .create_principal("admin", "Admin User", None, TEST_PASSWORD, Role::Admin)
        .unwrap();
    persistence
        .create_principal(
            "sales1",
            "Zhang San",
            Some("13800000001"),
            TEST_PASSWORD,
            Role::Salesperson,
        )
        .unwrap();
    let seller: Principal = persistence
        .get_principal_by_username("sales1")
        .unwrap()
        .unwrap()
        .to_principal();
    let customer_id: i64 = persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();
    let vehicle_id: i64 = persistence
        .create_vehicle(&create_test_vehicle("1HGCM82633A004352"))
        .unwrap();

    Seed {
        seller,
        customer_id,
        vehicle_id,
    }
}
