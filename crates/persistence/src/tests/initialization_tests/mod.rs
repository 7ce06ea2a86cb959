// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use std::time::Duration;

use autolot_domain::Role;

use crate::Persistence;
use crate::error::PersistenceError;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_principal("op1", "Operator One", None, "password", Role::Admin)
        .unwrap();

    assert_eq!(
        db1.count_principals().unwrap(),
        1,
        "db1 should have 1 principal"
    );
    assert_eq!(db2.count_principals().unwrap(), 0, "db2 should be isolated");
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autolot.db");

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .create_principal("admin", "Admin", None, "password", Role::Admin)
            .unwrap();
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.count_principals().unwrap(), 1);
}

#[test]
fn test_store_timeout_can_be_changed() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(
        persistence
            .set_store_timeout(Duration::from_millis(250))
            .is_ok()
    );
}
