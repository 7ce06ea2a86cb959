// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Role string is not one of the known principal roles.
    InvalidRole(String),
    /// Vehicle status string is not a known status.
    InvalidVehicleStatus(String),
    /// Order status string is not a known status.
    InvalidOrderStatus(String),
    /// VIN is malformed.
    InvalidVin(String),
    /// Order number is malformed.
    InvalidOrderNumber(String),
    /// A monetary amount is out of range.
    InvalidAmount {
        /// The field carrying the amount.
        field: &'static str,
        /// Why the amount was rejected.
        reason: String,
    },
    /// A name field is empty or invalid.
    InvalidName(String),
    /// A phone number is empty or invalid.
    InvalidPhone(String),
    /// Vehicle model year is outside the accepted range.
    InvalidModelYear(i32),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidVehicleStatus(status) => write!(f, "Invalid vehicle status: {status}"),
            Self::InvalidOrderStatus(status) => write!(f, "Invalid order status: {status}"),
            Self::InvalidVin(msg) => write!(f, "Invalid VIN: {msg}"),
            Self::InvalidOrderNumber(value) => write!(f, "Invalid order number: {value}"),
            Self::InvalidAmount { field, reason } => {
                write!(f, "Invalid amount for '{field}': {reason}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone: {msg}"),
            Self::InvalidModelYear(year) => {
                write!(
                    f,
                    "Invalid model year: {year}. Must be between 1900 and 2100"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Returns the name of the input field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidRole(_) => "role",
            Self::InvalidVehicleStatus(_) | Self::InvalidOrderStatus(_) => "status",
            Self::InvalidVin(_) => "vin",
            Self::InvalidOrderNumber(_) => "orderNumber",
            Self::InvalidAmount { field, .. } => field,
            Self::InvalidName(_) => "name",
            Self::InvalidPhone(_) => "phone",
            Self::InvalidModelYear(_) => "year",
            Self::DateParseError { .. } => "orderDate",
        }
    }
}
