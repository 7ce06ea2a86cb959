// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot::create_order;

use crate::error::PersistenceError;
use crate::tests::{create_test_customer, create_test_request, seed};
use crate::{CustomerData, CustomerRemoval, NewCustomerData, Persistence};

#[test]
fn test_create_and_get_customer() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();

    let customer: CustomerData = persistence.get_customer(id).unwrap().unwrap();

    assert_eq!(customer.name, "Li Wei");
    assert_eq!(customer.phone, "13900000001");
    assert_eq!(customer.id_card.as_deref(), Some("110101199013900000001"));
    assert!(customer.address.is_none());
}

#[test]
fn test_duplicate_customer_phone_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();

    let result = persistence.create_customer(&create_test_customer("13900000001"));

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_duplicate_id_card_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();
    let mut second: NewCustomerData = create_test_customer("13900000002");
    second.id_card = Some(String::from("110101199013900000001"));

    let result = persistence.create_customer(&second);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_customers_without_id_card_do_not_collide() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    for phone in ["13900000001", "13900000002"] {
        let mut customer: NewCustomerData = create_test_customer(phone);
        customer.id_card = None;
        persistence.create_customer(&customer).unwrap();
    }
}

#[test]
fn test_unknown_customer_is_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.get_customer(404).unwrap().is_none());
}

#[test]
fn test_get_customer_by_phone() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();

    let found = persistence.get_customer_by_phone("13900000001").unwrap();

    assert_eq!(found.map(|c| c.customer_id), Some(id));
    assert!(
        persistence
            .get_customer_by_phone("13900000009")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_update_customer_overwrites_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();
    let mut changed: NewCustomerData = create_test_customer("13900000002");
    changed.name = String::from("Li Na");
    changed.id_card = None;
    changed.address = Some(String::from("Chaoyang, Beijing"));

    assert!(persistence.update_customer(id, &changed).unwrap());

    let customer: CustomerData = persistence.get_customer(id).unwrap().unwrap();
    assert_eq!(customer.name, "Li Na");
    assert_eq!(customer.phone, "13900000002");
    assert!(customer.id_card.is_none());
    assert_eq!(customer.address.as_deref(), Some("Chaoyang, Beijing"));
}

#[test]
fn test_update_customer_with_unchanged_values_is_applied() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let customer: NewCustomerData = create_test_customer("13900000001");
    let id: i64 = persistence.create_customer(&customer).unwrap();

    assert!(persistence.update_customer(id, &customer).unwrap());
    assert!(!persistence.update_customer(404, &customer).unwrap());
}

#[test]
fn test_update_customer_to_taken_phone_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();
    let id: i64 = persistence
        .create_customer(&create_test_customer("13900000002"))
        .unwrap();
    let mut changed: NewCustomerData = create_test_customer("13900000001");
    changed.id_card = None;

    let result = persistence.update_customer(id, &changed);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
    let customer: CustomerData = persistence.get_customer(id).unwrap().unwrap();
    assert_eq!(customer.phone, "13900000002");
}

#[test]
fn test_delete_customer() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_customer(&create_test_customer("13900000001"))
        .unwrap();

    assert_eq!(
        persistence.delete_customer(id).unwrap(),
        CustomerRemoval::Removed
    );
    assert!(persistence.get_customer(id).unwrap().is_none());
    assert_eq!(
        persistence.delete_customer(id).unwrap(),
        CustomerRemoval::NotFound
    );
}

#[test]
fn test_customer_with_orders_is_kept() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seed = seed(&mut persistence);
    let request = create_test_request(seed.customer_id, seed.vehicle_id);
    create_order(&mut persistence, &seed.seller, &request).unwrap();

    assert_eq!(
        persistence.delete_customer(seed.customer_id).unwrap(),
        CustomerRemoval::HasOrders
    );
    assert!(
        persistence
            .get_customer(seed.customer_id)
            .unwrap()
            .is_some()
    );
}
