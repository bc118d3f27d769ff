//! Fixed-point unit conversions.
//!
//! On-chain amounts use an integer fixed-point representation scaled by
//! 10^18. Conversions go through [`rust_decimal::Decimal`] so that values
//! written as decimal text ("0.02") scale exactly, with no float rounding.

use alloy_primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::DomainError;

/// One whole unit in the on-chain fixed-point representation, 10^18.
pub const FIXED_POINT_ONE: u64 = 1_000_000_000_000_000_000;

/// Scale a decimal ether amount to integer wei.
///
/// The amount must be non-negative and exactly representable with 18
/// decimal places. Amounts with a remainder are rejected rather than
/// truncated.
///
/// # Errors
///
/// Returns a [`DomainError`] for negative, non-representable or
/// out-of-range amounts.
pub fn ether_to_wei(amount: Decimal) -> Result<U256, DomainError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::Negative(amount));
    }

    let scaled = amount
        .checked_mul(Decimal::from(FIXED_POINT_ONE))
        .ok_or(DomainError::Overflow(amount))?;
    if !scaled.fract().is_zero() {
        return Err(DomainError::NotRepresentable(amount));
    }

    let units = scaled.to_u128().ok_or(DomainError::Overflow(amount))?;
    Ok(U256::from(units))
}

/// Scale a decimal fee fraction to its on-chain fixed-point value.
///
/// Fee rates are fractions of one, so values above 1.0 are rejected on top
/// of the checks performed by [`ether_to_wei`].
///
/// # Errors
///
/// Returns a [`DomainError`] if the rate is negative, above 1.0, or not
/// exactly representable.
pub fn fee_rate_to_fixed_point(rate: Decimal) -> Result<U256, DomainError> {
    if rate > Decimal::ONE {
        return Err(DomainError::RateAboveOne(rate));
    }
    ether_to_wei(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn scales_two_percent_exactly() {
        let scaled = fee_rate_to_fixed_point(dec!(0.02)).unwrap();
        assert_eq!(scaled, U256::from(20_000_000_000_000_000u64));
    }

    #[test]
    fn scales_twenty_percent_exactly() {
        let scaled = fee_rate_to_fixed_point(dec!(0.20)).unwrap();
        assert_eq!(scaled, U256::from(200_000_000_000_000_000u64));
    }

    #[test]
    fn zero_and_one_are_valid_rates() {
        assert_eq!(fee_rate_to_fixed_point(Decimal::ZERO).unwrap(), U256::ZERO);
        assert_eq!(
            fee_rate_to_fixed_point(Decimal::ONE).unwrap(),
            U256::from(FIXED_POINT_ONE)
        );
    }

    #[test]
    fn eighteen_decimal_places_are_exact() {
        let rate = dec!(0.000000000000000001);
        assert_eq!(fee_rate_to_fixed_point(rate).unwrap(), U256::from(1u64));
    }

    #[test]
    fn rejects_rate_above_one() {
        let result = fee_rate_to_fixed_point(dec!(1.5));
        assert_eq!(result, Err(DomainError::RateAboveOne(dec!(1.5))));
    }

    #[test]
    fn rejects_negative_amount() {
        let result = ether_to_wei(dec!(-0.1));
        assert_eq!(result, Err(DomainError::Negative(dec!(-0.1))));
    }

    #[test]
    fn rejects_sub_wei_remainder() {
        let rate = dec!(0.0000000000000000015);
        assert_eq!(
            fee_rate_to_fixed_point(rate),
            Err(DomainError::NotRepresentable(rate))
        );
    }

    #[test]
    fn one_ether_is_10_pow_18_wei() {
        assert_eq!(
            ether_to_wei(Decimal::ONE).unwrap(),
            U256::from(FIXED_POINT_ONE)
        );
    }

    #[test]
    fn amgu_surcharges_above_one_ether_are_allowed() {
        assert_eq!(
            ether_to_wei(dec!(2.5)).unwrap(),
            U256::from(2_500_000_000_000_000_000u64)
        );
    }
}
