// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autolot_domain::Role;

use crate::error::StoreError;

/// An authenticated identity as currently recorded in the principal store.
///
/// This is always the store's view, never the claims carried by a
/// credential: role and enabled flag may have changed since the credential
/// was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique login name. Credentials carry this as their subject.
    pub username: String,
    /// Human-readable name shown on orders.
    pub real_name: String,
    /// Contact phone, if recorded.
    pub phone: Option<String>,
    /// Current role.
    pub role: Role,
    /// Disabled principals cannot log in or pass the access gate.
    pub enabled: bool,
}

impl Principal {
    /// Returns whether this principal currently holds one of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// Read-only lookup of principals by username.
pub trait PrincipalStore {
    /// Finds a principal by exact username.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn find_by_username(&mut self, username: &str) -> Result<Option<Principal>, StoreError>;
}
