// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.

use autolot::{Principal, PrincipalStore};
use autolot_persistence::{Persistence, PrincipalData};
use tracing::{debug, info, warn};

use crate::credential::{Claims, CredentialCodec};
use crate::error::{ApiError, GateError, translate_persistence_error};
use crate::operations::Operation;

/// Scheme prefix expected on the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Decides, per operation, whether a request may proceed.
///
/// The role embedded in a credential is never trusted on its own: every
/// protected call re-resolves the principal from the store, so disabling a
/// principal or changing its role takes effect on the next request.
#[derive(Debug, Clone, Copy)]
pub struct AccessGate<'a> {
    codec: &'a CredentialCodec,
}

impl<'a> AccessGate<'a> {
    /// Creates a gate that verifies credentials with `codec`.
    #[must_use]
    pub const fn new(codec: &'a CredentialCodec) -> Self {
        Self { codec }
    }

    /// Checks whether a request may invoke `operation`.
    ///
    /// # Arguments
    ///
    /// * `authorization` - The raw `Authorization` header value, if any
    /// * `operation` - The operation being invoked
    /// * `store` - The principal store to re-resolve the caller from
    ///
    /// # Returns
    ///
    /// `Ok(None)` for public operations, otherwise the resolved principal.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Unauthenticated` if the header is missing or
    /// malformed, the credential does not verify, or the principal no longer
    /// exists or is disabled. Returns `GateError::Forbidden` if the
    /// principal's current role is not allowed.
    pub fn check<S: PrincipalStore + ?Sized>(
        &self,
        authorization: Option<&str>,
        operation: Operation,
        store: &mut S,
    ) -> Result<Option<Principal>, GateError> {
        if operation.is_public() {
            return Ok(None);
        }

        let token: &str = bearer_token(authorization)?;
        let claims: Claims = self.codec.verify(token).inspect_err(|e| {
            debug!(operation = %operation, error = %e, "Credential rejected");
        })?;

        let principal: Principal = store
            .find_by_username(&claims.sub)
            .map_err(GateError::Store)?
            .ok_or_else(|| {
                warn!(username = %claims.sub, "Credential refers to unknown principal");
                GateError::Unauthenticated(String::from("principal no longer exists"))
            })?;

        if !principal.enabled {
            warn!(username = %principal.username, "Disabled principal presented a credential");
            return Err(GateError::Unauthenticated(String::from(
                "principal is disabled",
            )));
        }

        if !principal.has_any_role(operation.required_roles()) {
            warn!(
                username = %principal.username,
                role = %principal.role,
                operation = %operation,
                "Operation forbidden"
            );
            return Err(GateError::Forbidden {
                operation,
                role: principal.role,
            });
        }

        debug!(username = %principal.username, operation = %operation, "Access granted");
        Ok(Some(principal))
    }
}

/// Extracts the token from a `Bearer <token>` header value.
///
/// # Errors
///
/// Returns `GateError::Unauthenticated` if the header is missing, uses
/// another scheme, or carries an empty token.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, GateError> {
    let header: &str = authorization
        .ok_or_else(|| GateError::Unauthenticated(String::from("missing Authorization header")))?;
    let token: &str = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        GateError::Unauthenticated(String::from(
            "Authorization header must be 'Bearer <token>'",
        ))
    })?;
    if token.trim().is_empty() {
        return Err(GateError::Unauthenticated(String::from("empty token")));
    }
    Ok(token.trim())
}

/// Authentication service for credential issuance.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks a username and password and issues a credential.
    ///
    /// Unknown usernames, wrong passwords and disabled principals all
    /// produce the same error.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `codec` - The credential codec
    /// * `username` - The exact username
    /// * `password` - The plaintext password
    ///
    /// # Returns
    ///
    /// A tuple of (`token`, `principal`)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::LoginFailed` if the credentials are refused, or
    /// another error if the store fails.
    pub fn login(
        persistence: &mut Persistence,
        codec: &CredentialCodec,
        username: &str,
        password: &str,
    ) -> Result<(String, Principal), ApiError> {
        let Some(data): Option<PrincipalData> = persistence
            .get_principal_by_username(username)
            .map_err(translate_persistence_error)?
        else {
            warn!(username, "Login failed: unknown principal");
            return Err(ApiError::LoginFailed);
        };

        let password_ok: bool = Persistence::verify_password(password, &data.password_hash)
            .map_err(translate_persistence_error)?;
        if !password_ok {
            warn!(username, "Login failed: wrong password");
            return Err(ApiError::LoginFailed);
        }

        if !data.is_enabled {
            warn!(username, "Login failed: principal disabled");
            return Err(ApiError::LoginFailed);
        }

        let principal: Principal = data.to_principal();
        let token: String = codec
            .issue(&principal.username, principal.role)
            .map_err(|e| ApiError::Internal {
                message: e.to_string(),
            })?;

        info!(username, role = %principal.role, "Login succeeded");
        Ok((token, principal))
    }
}
