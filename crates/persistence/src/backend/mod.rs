// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection setup, migrations, lock timeouts and the few helpers Diesel
//! has no DSL for live here. Everything in `queries/` and `mutations/` is
//! written once against the Diesel DSL and stamped out per backend.

pub mod mysql;
pub mod sqlite;

use std::time::Duration;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Operations that need backend-specific SQL.
pub trait PersistenceBackend: Connection {
    /// Retrieves the id generated by the most recent insert on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Bounds how long a statement waits for a row or database lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be applied.
    fn set_lock_timeout(&mut self, timeout: Duration) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn set_lock_timeout(&mut self, timeout: Duration) -> Result<(), PersistenceError> {
        sqlite::set_busy_timeout(self, timeout)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }

    fn set_lock_timeout(&mut self, timeout: Duration) -> Result<(), PersistenceError> {
        mysql::set_lock_wait_timeout(self, timeout)
    }
}
