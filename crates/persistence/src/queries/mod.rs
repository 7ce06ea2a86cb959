// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! All read-only queries live here, one module per table. Each query is
//! written once inside `backend_fn!` and exists as a `_sqlite` and a
//! `_mysql` function; the `Persistence` adapter in `lib.rs` picks one based
//! on the active connection.

pub mod customers;
pub mod orders;
pub mod principals;
pub mod vehicles;

pub use customers::{
    customer_exists_mysql, customer_exists_sqlite, get_customer_by_phone_mysql,
    get_customer_by_phone_sqlite, get_customer_mysql, get_customer_sqlite,
};
pub use orders::{
    count_orders_for_vehicle_mysql, count_orders_for_vehicle_sqlite, get_order_detail_mysql,
    get_order_detail_sqlite,
};
pub use principals::{
    count_principals_mysql, count_principals_sqlite, get_principal_by_id_mysql,
    get_principal_by_id_sqlite, get_principal_by_username_mysql, get_principal_by_username_sqlite,
    list_enabled_principals_by_role_mysql, list_enabled_principals_by_role_sqlite, verify_password,
};
pub use vehicles::{
    get_vehicle_mysql, get_vehicle_sqlite, get_vehicle_status_mysql, get_vehicle_status_sqlite,
};
