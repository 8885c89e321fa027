//! VAT (Value-Added Tax) calculation for sales

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{round_money, LedgerError, LedgerResult};

/// Validate that a VAT rate percentage lies in `[0, 100]`.
///
/// Out-of-range rates are rejected, never clamped.
pub fn validate_vat_rate(rate: &BigDecimal) -> LedgerResult<()> {
    if *rate < BigDecimal::from(0) || *rate > BigDecimal::from(100) {
        return Err(LedgerError::Validation(format!(
            "VAT rate must be between 0 and 100, got {}",
            rate
        )));
    }
    Ok(())
}

/// Detailed VAT calculation breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// Base amount (after discount, before VAT)
    pub base_amount: BigDecimal,
    /// VAT rate percentage used for calculation
    pub vat_rate: BigDecimal,
    /// Calculated VAT amount, rounded to currency precision
    pub vat_amount: BigDecimal,
    /// Total amount including VAT
    pub total_amount: BigDecimal,
}

impl VatBreakdown {
    /// Calculate VAT from a base amount and a rate percentage
    pub fn calculate(base_amount: BigDecimal, vat_rate: BigDecimal) -> LedgerResult<Self> {
        validate_vat_rate(&vat_rate)?;

        let vat_amount = round_money(&((&base_amount * &vat_rate) / BigDecimal::from(100)));
        let total_amount = &base_amount + &vat_amount;

        Ok(Self {
            base_amount,
            vat_rate,
            vat_amount,
            total_amount,
        })
    }

    /// Calculate the base amount from a VAT-inclusive total (reverse calculation)
    pub fn reverse_calculate(total_amount: BigDecimal, vat_rate: BigDecimal) -> LedgerResult<Self> {
        validate_vat_rate(&vat_rate)?;

        let divisor = BigDecimal::from(100) + &vat_rate;
        let base_amount = round_money(&((&total_amount * BigDecimal::from(100)) / divisor));

        Self::calculate(base_amount, vat_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vat_on_discounted_subtotal() {
        // 5% on 1950 = 97.50
        let calc = VatBreakdown::calculate(BigDecimal::from(1950), BigDecimal::from(5)).unwrap();
        assert_eq!(calc.vat_amount.to_string(), "97.50");
        assert_eq!(calc.total_amount, round_money(&(BigDecimal::from(204750) / BigDecimal::from(100))));
    }

    #[test]
    fn zero_rate_yields_zero_vat() {
        let calc = VatBreakdown::calculate(BigDecimal::from(500), BigDecimal::from(0)).unwrap();
        assert_eq!(calc.vat_amount, BigDecimal::from(0));
        assert_eq!(calc.total_amount, BigDecimal::from(500));
    }

    #[test]
    fn rate_out_of_bounds_is_rejected() {
        assert!(VatBreakdown::calculate(BigDecimal::from(100), BigDecimal::from(101)).is_err());
        assert!(VatBreakdown::calculate(BigDecimal::from(100), BigDecimal::from(-1)).is_err());
    }

    #[test]
    fn reverse_calculation_recovers_base() {
        let total = BigDecimal::from(2100); // 2000 + 5%
        let calc = VatBreakdown::reverse_calculate(total, BigDecimal::from(5)).unwrap();
        assert_eq!(calc.base_amount, BigDecimal::from(2000));
        assert_eq!(calc.vat_amount, BigDecimal::from(100));
    }
}
