// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! All state-changing statements live here. Writes that must not race a
//! sale (reservation, deletion, status changes) are single guarded
//! statements whose affected-row count decides the outcome; a follow-up
//! read only explains a zero count, it never decides whether to write.

pub mod customers;
pub mod orders;
pub mod principals;
pub mod vehicles;

pub use customers::{
    create_customer_mysql, create_customer_sqlite, delete_customer_mysql, delete_customer_sqlite,
    update_customer_mysql, update_customer_sqlite,
};
pub use orders::{insert_order_mysql, insert_order_sqlite};
pub use principals::{
    create_principal_mysql, create_principal_sqlite, set_principal_enabled_mysql,
    set_principal_enabled_sqlite, set_principal_role_mysql, set_principal_role_sqlite,
};
pub use vehicles::{
    create_vehicle_mysql, create_vehicle_sqlite, delete_vehicle_mysql, delete_vehicle_sqlite,
    release_vehicle_mysql, release_vehicle_sqlite, reserve_vehicle_mysql, reserve_vehicle_sqlite,
    update_vehicle_mysql, update_vehicle_sqlite, update_vehicle_status_mysql,
    update_vehicle_status_sqlite,
};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Formats a timestamp the way every `created_at` column stores it.
pub(crate) fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

pub(crate) fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}
