// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot_domain::Role;

use crate::tests::helpers::{MapPrincipalStore, create_test_codec, create_test_principal};
use crate::{AccessGate, GateError, Operation, bearer_token};

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[test]
fn test_public_operation_needs_no_credential() {
    let codec = create_test_codec();
    let mut store = MapPrincipalStore::default();

    let result = AccessGate::new(&codec).check(None, Operation::Health, &mut store);

    assert_eq!(result, Ok(None));
    assert_eq!(store.lookups, 0);
}

#[test]
fn test_missing_header_on_admin_operation_is_unauthenticated() {
    let codec = create_test_codec();
    let mut store = MapPrincipalStore::default();

    let result = AccessGate::new(&codec).check(None, Operation::CreateVehicle, &mut store);

    assert!(matches!(result, Err(GateError::Unauthenticated(_))));
    assert_eq!(store.lookups, 0);
}

#[test]
fn test_wrong_scheme_is_unauthenticated() {
    assert!(matches!(
        bearer_token(Some("Basic YWRtaW46cGFzcw==")),
        Err(GateError::Unauthenticated(_))
    ));
    assert!(matches!(
        bearer_token(Some("Bearer ")),
        Err(GateError::Unauthenticated(_))
    ));
    assert_eq!(bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
}

#[test]
fn test_invalid_token_is_unauthenticated() {
    let codec = create_test_codec();
    let mut store =
        MapPrincipalStore::with(&[create_test_principal(1, "admin", Role::Admin)]);

    let result = AccessGate::new(&codec).check(
        Some(&bearer("garbage.token")),
        Operation::GetVehicle,
        &mut store,
    );

    assert!(matches!(result, Err(GateError::Unauthenticated(_))));
    assert_eq!(store.lookups, 0);
}

#[test]
fn test_valid_token_resolves_current_principal() {
    let codec = create_test_codec();
    let seller = create_test_principal(11, "sales1", Role::Salesperson);
    let mut store = MapPrincipalStore::with(std::slice::from_ref(&seller));
    let token = codec.issue("sales1", Role::Salesperson).unwrap();

    let result = AccessGate::new(&codec).check(
        Some(&bearer(&token)),
        Operation::CreateOrder,
        &mut store,
    );

    assert_eq!(result, Ok(Some(seller)));
    assert_eq!(store.lookups, 1);
}

#[test]
fn test_salesperson_token_on_admin_operation_is_forbidden() {
    let codec = create_test_codec();
    let mut store =
        MapPrincipalStore::with(&[create_test_principal(11, "sales1", Role::Salesperson)]);
    let token = codec.issue("sales1", Role::Salesperson).unwrap();

    let result = AccessGate::new(&codec).check(
        Some(&bearer(&token)),
        Operation::CreateVehicle,
        &mut store,
    );

    assert_eq!(
        result,
        Err(GateError::Forbidden {
            operation: Operation::CreateVehicle,
            role: Role::Salesperson,
        })
    );
}

#[test]
fn test_disabled_principal_with_valid_token_is_unauthenticated() {
    let codec = create_test_codec();
    let mut admin = create_test_principal(1, "admin", Role::Admin);
    admin.enabled = false;
    let mut store = MapPrincipalStore::with(&[admin]);
    let token = codec.issue("admin", Role::Admin).unwrap();

    let result = AccessGate::new(&codec).check(
        Some(&bearer(&token)),
        Operation::CreateVehicle,
        &mut store,
    );

    assert!(matches!(result, Err(GateError::Unauthenticated(_))));
}

#[test]
fn test_vanished_principal_is_unauthenticated() {
    let codec = create_test_codec();
    let mut store = MapPrincipalStore::default();
    let token = codec.issue("ghost", Role::Admin).unwrap();

    let result =
        AccessGate::new(&codec).check(Some(&bearer(&token)), Operation::GetOrder, &mut store);

    assert!(matches!(result, Err(GateError::Unauthenticated(_))));
}

#[test]
fn test_current_role_wins_over_token_role() {
    let codec = create_test_codec();
    // Issued while an admin, demoted since.
    let token = codec.issue("manager", Role::Admin).unwrap();
    let mut store =
        MapPrincipalStore::with(&[create_test_principal(5, "manager", Role::SalesManager)]);

    let gate = AccessGate::new(&codec);

    assert!(matches!(
        gate.check(Some(&bearer(&token)), Operation::DeleteVehicle, &mut store),
        Err(GateError::Forbidden { .. })
    ));
    assert!(
        gate.check(Some(&bearer(&token)), Operation::GetOrder, &mut store)
            .is_ok()
    );
}

#[test]
fn test_promoted_principal_gains_access_without_new_token() {
    let codec = create_test_codec();
    let token = codec.issue("sales1", Role::Salesperson).unwrap();
    let mut store =
        MapPrincipalStore::with(&[create_test_principal(11, "sales1", Role::Admin)]);

    let result = AccessGate::new(&codec).check(
        Some(&bearer(&token)),
        Operation::UpdateVehicleStatus,
        &mut store,
    );

    assert!(result.unwrap().is_some());
}

#[test]
fn test_store_failure_is_reported() {
    let codec = create_test_codec();
    let mut store = MapPrincipalStore {
        fail: true,
        ..MapPrincipalStore::default()
    };
    let token = codec.issue("admin", Role::Admin).unwrap();

    let result =
        AccessGate::new(&codec).check(Some(&bearer(&token)), Operation::GetOrder, &mut store);

    assert!(matches!(result, Err(GateError::Store(_))));
}
