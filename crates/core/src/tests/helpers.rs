// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot_domain::{Money, Role, VehicleStatus};
use time::macros::date;

use crate::{MemoryLedger, OrderRequest, Principal};

pub const VEHICLE_ID: i64 = 7;
pub const CUSTOMER_ID: i64 = 3;

pub fn create_test_seller() -> Principal {
    create_test_principal(11, "sales1", Role::Salesperson)
}

pub fn create_test_principal(id: i64, username: &str, role: Role) -> Principal {
    Principal {
        id,
        username: username.to_string(),
        real_name: format!("Test {username}"),
        phone: None,
        role,
        enabled: true,
    }
}

pub fn create_test_ledger() -> MemoryLedger {
    let ledger: MemoryLedger = MemoryLedger::new();
    ledger
        .put_vehicle(VEHICLE_ID, VehicleStatus::Available)
        .unwrap();
    ledger.put_customer(CUSTOMER_ID).unwrap();
    ledger
}

pub fn create_test_request() -> OrderRequest {
    OrderRequest {
        customer_id: CUSTOMER_ID,
        vehicle_id: VEHICLE_ID,
        actual_price: Money::from_cents(2_350_000),
        original_price: Some(Money::from_cents(2_500_000)),
        discount_amount: Some(Money::from_cents(150_000)),
        order_date: date!(2026 - 03 - 14),
        remark: Some(String::from("Cash sale")),
    }
}
