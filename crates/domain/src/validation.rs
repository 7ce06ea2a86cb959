// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Money;
use time::Date;
use time::macros::format_description;

/// Validates the price fields of a sale.
///
/// # Arguments
///
/// * `actual_price` - The agreed selling price
/// * `original_price` - The list price, if supplied
/// * `discount_amount` - The discount granted, if supplied
///
/// # Errors
///
/// Returns an error if:
/// - The actual price is not strictly positive
/// - The original price or discount is negative
/// - The discount exceeds the original price
pub fn validate_sale_prices(
    actual_price: Money,
    original_price: Option<Money>,
    discount_amount: Option<Money>,
) -> Result<(), DomainError> {
    if !actual_price.is_positive() {
        return Err(DomainError::InvalidAmount {
            field: "actualPrice",
            reason: String::from("must be greater than 0"),
        });
    }

    if let Some(original) = original_price
        && original < Money::ZERO
    {
        return Err(DomainError::InvalidAmount {
            field: "originalPrice",
            reason: String::from("must not be negative"),
        });
    }

    if let Some(discount) = discount_amount {
        if discount < Money::ZERO {
            return Err(DomainError::InvalidAmount {
                field: "discountAmount",
                reason: String::from("must not be negative"),
            });
        }
        if let Some(original) = original_price
            && discount > original
        {
            return Err(DomainError::InvalidAmount {
                field: "discountAmount",
                reason: format!("{discount} exceeds original price {original}"),
            });
        }
    }

    Ok(())
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_order_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Validates the required fields of a customer record.
///
/// # Errors
///
/// Returns an error if the name is blank or the phone number is not
/// 6 to 20 digits (an optional leading `+` is allowed).
pub fn validate_customer_fields(name: &str, phone: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let digits: &str = phone.strip_prefix('+').unwrap_or(phone);
    if !(6..=20).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidPhone(format!(
            "'{phone}' is not a valid phone number"
        )));
    }

    Ok(())
}

/// Validates the descriptive fields of a new vehicle.
///
/// # Errors
///
/// Returns an error if brand or model is blank, the model year is outside
/// 1900..=2100, or the price is not strictly positive.
pub fn validate_vehicle_fields(
    brand: &str,
    model: &str,
    year: i32,
    price: Money,
) -> Result<(), DomainError> {
    if brand.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Brand cannot be empty",
        )));
    }
    if model.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Model cannot be empty",
        )));
    }
    if !(1900..=2100).contains(&year) {
        return Err(DomainError::InvalidModelYear(year));
    }
    if !price.is_positive() {
        return Err(DomainError::InvalidAmount {
            field: "price",
            reason: String::from("must be greater than 0"),
        });
    }
    Ok(())
}
