// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::HashMap;

use autolot::{Principal, PrincipalStore, StoreError};
use autolot_domain::Role;
use autolot_persistence::{NewCustomerData, NewVehicleData, Persistence};
use time::Duration;

use crate::CredentialCodec;

pub const TEST_SECRET: &[u8] = b"an-unguessable-32-byte-test-secret!!";
pub const TEST_PASSWORD: &str = "Sales-Password-1";

pub fn create_test_codec() -> CredentialCodec {
    CredentialCodec::new(TEST_SECRET, Duration::hours(24)).unwrap()
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

/// A principal store backed by a map, with a switch to make lookups fail.
#[derive(Default)]
pub struct MapPrincipalStore {
    pub principals: HashMap<String, Principal>,
    pub lookups: usize,
    pub fail: bool,
}

impl MapPrincipalStore {
    pub fn with(principals: &[Principal]) -> Self {
        Self {
            principals: principals
                .iter()
                .map(|p| (p.username.clone(), p.clone()))
                .collect(),
            ..Self::default()
        }
    }
}

impl PrincipalStore for MapPrincipalStore {
    fn find_by_username(&mut self, username: &str) -> Result<Option<Principal>, StoreError> {
        self.lookups += 1;
        if self.fail {
            return Err(StoreError::Failure(String::from("store offline")));
        }
        Ok(self.principals.get(username).cloned())
    }
}

/// Ids created by [`create_test_persistence`].
pub struct Fixture {
    pub admin: Principal,
    pub seller: Principal,
    pub customer_id: i64,
    pub vehicle_id: i64,
}

/// An in-memory database with an admin, a salesperson, one customer and one
/// available vehicle.
pub fn create_test_persistence() -> (Persistence, Fixture) {
    let mut persistence = Persistence::new_in_memory().unwrap();
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
    let customer_id = persistence
        .create_customer(&NewCustomerData {
            name: String::from("Li Wei"),
            phone: String::from("13900000001"),
            id_card: None,
            gender: None,
            address: None,
        })
        .unwrap();
    let vehicle_id = persistence
        .create_vehicle(&NewVehicleData {
            vin: autolot_domain::Vin::new("1HGCM82633A004352").unwrap(),
            brand: String::from("Honda"),
            model: String::from("Accord"),
            color: Some(String::from("Black")),
            model_year: 2024,
            price: autolot_domain::Money::from_cents(2_000_000),
        })
        .unwrap();

    let admin = persistence
        .get_principal_by_username("admin")
        .unwrap()
        .unwrap()
        .to_principal();
    let seller = persistence
        .get_principal_by_username("sales1")
        .unwrap()
        .unwrap()
        .to_principal();

    (
        persistence,
        Fixture {
            admin,
            seller,
            customer_id,
            vehicle_id,
        },
    )
}
