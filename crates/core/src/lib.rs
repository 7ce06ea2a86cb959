// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod ledger;
mod memory;
mod order;
mod principal;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::{SaleError, StoreError};
pub use ledger::{InventoryLedger, OrderRecords, Reservation, SalesLedger};
pub use memory::MemoryLedger;
pub use order::{CompletedSale, NewOrder, OrderRequest, create_order, create_order_with_number};
pub use principal::{Principal, PrincipalStore};
