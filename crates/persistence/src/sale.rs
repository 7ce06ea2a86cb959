// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core collaborator traits implemented on top of Diesel.
//!
//! A sale runs on one connection inside one database transaction. On
//! `SQLite` the transaction is opened with `BEGIN IMMEDIATE`, taking the
//! database write lock up front; on `MySQL` the guarded update takes the
//! row lock. Either way a racing second sale waits (bounded by the lock
//! timeout) and then observes the committed `SOLD` status.

use autolot::{
    InventoryLedger, NewOrder, OrderRecords, Principal, PrincipalStore, Reservation, SaleError,
    SalesLedger, StoreError,
};
use diesel::{Connection, MysqlConnection, SqliteConnection};
use tracing::error;

use crate::{BackendConnection, Persistence, mutations, queries};

/// A connection borrowed for the duration of a sale.
pub enum SaleTransaction<'a> {
    Sqlite(&'a mut SqliteConnection),
    Mysql(&'a mut MysqlConnection),
}

impl InventoryLedger for SaleTransaction<'_> {
    fn try_reserve(&mut self, vehicle_id: i64) -> Result<Reservation, StoreError> {
        let result = match self {
            Self::Sqlite(conn) => mutations::reserve_vehicle_sqlite(conn, vehicle_id),
            Self::Mysql(conn) => mutations::reserve_vehicle_mysql(conn, vehicle_id),
        };
        Ok(result?)
    }

    fn rollback_reservation(&mut self, vehicle_id: i64) -> Result<(), StoreError> {
        let result = match self {
            Self::Sqlite(conn) => mutations::release_vehicle_sqlite(conn, vehicle_id),
            Self::Mysql(conn) => mutations::release_vehicle_mysql(conn, vehicle_id),
        };
        Ok(result?)
    }
}

impl OrderRecords for SaleTransaction<'_> {
    fn customer_exists(&mut self, customer_id: i64) -> Result<bool, StoreError> {
        let result = match self {
            Self::Sqlite(conn) => queries::customer_exists_sqlite(conn, customer_id),
            Self::Mysql(conn) => queries::customer_exists_mysql(conn, customer_id),
        };
        Ok(result?)
    }

    fn insert_order(&mut self, order: &NewOrder) -> Result<i64, StoreError> {
        let result = match self {
            Self::Sqlite(conn) => mutations::insert_order_sqlite(conn, order),
            Self::Mysql(conn) => mutations::insert_order_mysql(conn, order),
        };
        Ok(result?)
    }
}

/// Carries either the sale's own error or Diesel's out of the closure
/// handed to `Connection::transaction`, which requires
/// `E: From<diesel::result::Error>`.
enum TxError {
    Sale(SaleError),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Diesel(err)
    }
}

impl SalesLedger for Persistence {
    type Tx<'a>
        = SaleTransaction<'a>
    where
        Self: 'a;

    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, SaleError>
    where
        F: FnOnce(&mut Self::Tx<'_>) -> Result<T, SaleError>,
    {
        let result: Result<T, TxError> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.immediate_transaction(|conn| {
                f(&mut SaleTransaction::Sqlite(conn)).map_err(TxError::Sale)
            }),
            BackendConnection::Mysql(conn) => conn.transaction(|conn| {
                f(&mut SaleTransaction::Mysql(conn)).map_err(TxError::Sale)
            }),
        };

        result.map_err(|e| match e {
            TxError::Sale(err) => err,
            TxError::Diesel(err) => {
                error!(error = %err, "Sale transaction failed");
                SaleError::PersistenceFailure(err.to_string())
            }
        })
    }
}

impl PrincipalStore for Persistence {
    fn find_by_username(&mut self, username: &str) -> Result<Option<Principal>, StoreError> {
        Ok(self
            .get_principal_by_username(username)?
            .map(|data| data.to_principal()))
    }
}
