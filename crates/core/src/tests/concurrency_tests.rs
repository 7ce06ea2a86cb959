// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::{Arc, Barrier};
use std::thread;

use autolot_domain::{Role, VehicleStatus};

use crate::tests::helpers::{
    VEHICLE_ID, create_test_ledger, create_test_principal, create_test_request,
};
use crate::{CompletedSale, MemoryLedger, SaleError, create_order};

#[test]
fn test_racing_sales_of_one_vehicle_have_exactly_one_winner() {
    for _ in 0..50 {
        let ledger: MemoryLedger = create_test_ledger();
        let barrier: Arc<Barrier> = Arc::new(Barrier::new(2));

        let handles: Vec<_> = [(21, "sales_a"), (22, "sales_b")]
            .into_iter()
            .map(|(id, name)| {
                let mut ledger: MemoryLedger = ledger.clone();
                let barrier: Arc<Barrier> = Arc::clone(&barrier);
                thread::spawn(move || {
                    let seller = create_test_principal(id, name, Role::Salesperson);
                    barrier.wait();
                    create_order(&mut ledger, &seller, &create_test_request())
                })
            })
            .collect();

        let results: Vec<Result<CompletedSale, SaleError>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: usize = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(SaleError::VehicleNotSellable {
                status: VehicleStatus::Sold,
                ..
            })
        )));
        assert_eq!(ledger.orders().unwrap().len(), 1);
        assert_eq!(
            ledger.vehicle_status(VEHICLE_ID).unwrap(),
            Some(VehicleStatus::Sold)
        );
    }
}
