//! Business-rule validation and boundary normalization
//!
//! Callers are expected to have checked type and shape already; these
//! re-check the business constraints and fail closed before any write.
//! Invalid financial inputs are rejected, never silently corrected.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::{LedgerError, LedgerResult};

/// Validate that a product name is non-empty and within bounds
pub fn validate_product_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "product name cannot be empty".to_string(),
        ));
    }
    if name.len() > 255 {
        return Err(LedgerError::Validation(
            "product name cannot exceed 255 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a description is non-empty and within bounds
pub fn validate_description(description: &str) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation(
            "description cannot be empty".to_string(),
        ));
    }
    if description.len() > 255 {
        return Err(LedgerError::Validation(
            "description cannot exceed 255 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a unit price is not negative
pub fn validate_price(price: &BigDecimal) -> LedgerResult<()> {
    if *price < BigDecimal::from(0) {
        return Err(LedgerError::Validation(format!(
            "price cannot be negative, got {}",
            price
        )));
    }
    Ok(())
}

/// Validate that a quantity is at least 1
pub fn validate_quantity(quantity: u32) -> LedgerResult<()> {
    if quantity < 1 {
        return Err(LedgerError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a monetary amount is not negative
pub fn validate_non_negative(amount: &BigDecimal, field: &str) -> LedgerResult<()> {
    if *amount < BigDecimal::from(0) {
        return Err(LedgerError::Validation(format!(
            "{} cannot be negative, got {}",
            field, amount
        )));
    }
    Ok(())
}

/// Validate that a discount does not exceed the subtotal it applies to
pub fn validate_discount(discount: &BigDecimal, subtotal: &BigDecimal) -> LedgerResult<()> {
    if discount > subtotal {
        return Err(LedgerError::Validation(format!(
            "discount {} exceeds subtotal {}",
            discount, subtotal
        )));
    }
    Ok(())
}

/// Validate that the paid amount does not exceed the sale total.
///
/// Overpayment is rejected rather than modelled as a negative due
/// amount.
pub fn validate_paid_amount(paid: &BigDecimal, total: &BigDecimal) -> LedgerResult<()> {
    if paid > total {
        return Err(LedgerError::Validation(format!(
            "paid amount {} exceeds sale total {}",
            paid, total
        )));
    }
    Ok(())
}

/// Parse a calendar date at the input boundary.
///
/// Accepts ISO 8601 (`YYYY-MM-DD`) and the legacy display form
/// (`DD-MM-YYYY`), normalizing both to a plain [`NaiveDate`]. Entities
/// only ever store the normalized value; any other format is rejected.
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d-%m-%Y"))
        .map_err(|_| {
            LedgerError::Validation(format!(
                "unrecognized date '{}', expected YYYY-MM-DD or DD-MM-YYYY",
                input
            ))
        })
}

/// Render a date in the DD-MM-YYYY display form
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
