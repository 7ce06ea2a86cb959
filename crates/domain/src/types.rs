// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Principal roles for authorization.
///
/// Roles determine which operations an authenticated principal may invoke.
/// The wire and storage form is the upper-case name (`ADMIN`, `SALESPERSON`,
/// `SALES_MANAGER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Administrators: inventory management and everything salespeople can do.
    Admin,
    /// Salespeople: register customers and sell vehicles.
    Salesperson,
    /// Sales managers: salesperson capabilities plus reporting.
    SalesManager,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Salesperson, Self::SalesManager];

    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Salesperson => "SALESPERSON",
            Self::SalesManager => "SALES_MANAGER",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "SALESPERSON" => Ok(Self::Salesperson),
            "SALES_MANAGER" => Ok(Self::SalesManager),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability state of a vehicle in inventory.
///
/// A vehicle is created `Available`. The only transition performed by the
/// sales path is `Available -> Sold`, and `Sold` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    /// In stock and sellable.
    #[default]
    Available,
    /// Held back from sale (e.g. pending inspection). Not sellable.
    Locked,
    /// Sold. Terminal; the vehicle can no longer be deleted.
    Sold,
}

impl VehicleStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Locked => "LOCKED",
            Self::Sold => "SOLD",
        }
    }

    /// Returns whether a sale may reserve a vehicle in this state.
    #[must_use]
    pub const fn is_sellable(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Returns whether the vehicle record may be deleted in this state.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        !matches!(self, Self::Sold)
    }
}

impl FromStr for VehicleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "LOCKED" => Ok(Self::Locked),
            "SOLD" => Ok(Self::Sold),
            _ => Err(DomainError::InvalidVehicleStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a sales order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The sale went through. Every order is created in this state.
    #[default]
    Completed,
    /// The sale was reversed.
    Cancelled,
}

impl OrderStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidOrderStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monetary amount in minor currency units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns whether the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.0 < 0 { "-" } else { "" };
        let abs: u64 = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// A vehicle identification number.
///
/// Stored upper-cased. Exactly 17 characters, ASCII alphanumerics only,
/// excluding `I`, `O` and `Q`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vin(String);

impl Vin {
    /// Required VIN length.
    pub const LENGTH: usize = 17;

    /// Parses and normalizes a VIN.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVin` if the value is not a well-formed VIN.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_uppercase();
        if normalized.len() != Self::LENGTH {
            return Err(DomainError::InvalidVin(format!(
                "VIN must be exactly {} characters, got {}",
                Self::LENGTH,
                normalized.len()
            )));
        }
        if let Some(bad) = normalized
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() || matches!(c, 'I' | 'O' | 'Q'))
        {
            return Err(DomainError::InvalidVin(format!(
                "VIN contains invalid character '{bad}'"
            )));
        }
        Ok(Self(normalized))
    }

    /// Returns the VIN string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Vin {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Vin> for String {
    fn from(vin: Vin) -> Self {
        vin.0
    }
}

impl std::fmt::Display for Vin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sales order number.
///
/// Generated numbers have the form `ORD` + 17-digit UTC timestamp
/// (`yyyyMMddHHmmssSSS`) + 4-digit discriminator. Timestamps alone collide
/// under concurrent sales; uniqueness is ultimately enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Prefix carried by every order number.
    pub const PREFIX: &'static str = "ORD";

    /// Builds an order number from a timestamp and a discriminator.
    ///
    /// Only the last four decimal digits of `discriminator` are used.
    #[must_use]
    pub fn generate(at: OffsetDateTime, discriminator: u32) -> Self {
        let utc: OffsetDateTime = at.to_offset(time::UtcOffset::UTC);
        Self(format!(
            "{}{:04}{:02}{:02}{:02}{:02}{:02}{:03}{:04}",
            Self::PREFIX,
            utc.year(),
            u8::from(utc.month()),
            utc.day(),
            utc.hour(),
            utc.minute(),
            utc.second(),
            utc.millisecond(),
            discriminator % 10_000
        ))
    }

    /// Parses an existing order number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOrderNumber` if the value does not start
    /// with the prefix followed by 1 to 32 digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let digits: &str = value
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| DomainError::InvalidOrderNumber(value.to_string()))?;
        if digits.is_empty() || digits.len() > 32 || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(DomainError::InvalidOrderNumber(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the order number string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderNumber> for String {
    fn from(number: OrderNumber) -> Self {
        number.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
