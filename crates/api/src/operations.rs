// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The operation table consulted by the access gate.

use autolot_domain::Role;

const ANY_ROLE: &[Role] = &[Role::Admin, Role::Salesperson, Role::SalesManager];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const PUBLIC: &[Role] = &[];

/// Every operation exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Health,
    Login,
    Logout,
    CurrentPrincipal,
    ListSalespersons,
    CreateOrder,
    GetOrder,
    CreateCustomer,
    GetCustomer,
    UpdateCustomer,
    DeleteCustomer,
    CreateVehicle,
    GetVehicle,
    UpdateVehicle,
    DeleteVehicle,
    UpdateVehicleStatus,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Health,
        Self::Login,
        Self::Logout,
        Self::CurrentPrincipal,
        Self::ListSalespersons,
        Self::CreateOrder,
        Self::GetOrder,
        Self::CreateCustomer,
        Self::GetCustomer,
        Self::UpdateCustomer,
        Self::DeleteCustomer,
        Self::CreateVehicle,
        Self::GetVehicle,
        Self::UpdateVehicle,
        Self::DeleteVehicle,
        Self::UpdateVehicleStatus,
    ];

    /// Roles allowed to invoke this operation. Empty means public.
    #[must_use]
    pub const fn required_roles(self) -> &'static [Role] {
        match self {
            Self::Health | Self::Login | Self::Logout => PUBLIC,
            Self::CurrentPrincipal
            | Self::ListSalespersons
            | Self::CreateOrder
            | Self::GetOrder
            | Self::CreateCustomer
            | Self::GetCustomer
            | Self::UpdateCustomer
            | Self::DeleteCustomer
            | Self::GetVehicle => ANY_ROLE,
            Self::CreateVehicle
            | Self::UpdateVehicle
            | Self::DeleteVehicle
            | Self::UpdateVehicleStatus => ADMIN_ONLY,
        }
    }

    /// Returns whether anyone may invoke this operation.
    #[must_use]
    pub const fn is_public(self) -> bool {
        self.required_roles().is_empty()
    }

    /// Operation name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::CurrentPrincipal => "current_principal",
            Self::ListSalespersons => "list_salespersons",
            Self::CreateOrder => "create_order",
            Self::GetOrder => "get_order",
            Self::CreateCustomer => "create_customer",
            Self::GetCustomer => "get_customer",
            Self::UpdateCustomer => "update_customer",
            Self::DeleteCustomer => "delete_customer",
            Self::CreateVehicle => "create_vehicle",
            Self::GetVehicle => "get_vehicle",
            Self::UpdateVehicle => "update_vehicle",
            Self::DeleteVehicle => "delete_vehicle",
            Self::UpdateVehicleStatus => "update_vehicle_status",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
