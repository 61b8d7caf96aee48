//! Signed relative change between a reference value and a new value.
//!
//! A zero reference never divides by zero: the divisor becomes 1 and the
//! substitution is recorded in `treat_zero_reference_value_as_one`, so a score
//! going from 0 to 0.01 still reads differently from 0 to 0.1.
//!
//! A change too large to represent saturates at `Decimal::MAX` or
//! `Decimal::MIN` in the direction of the change.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const FRACTIONAL_DIGITS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageChange {
    pub reference_value: Decimal,
    pub new_value: Decimal,
    pub percentage_change_value: Decimal,
    pub treat_zero_reference_value_as_one: bool,
}

impl PercentageChange {
    pub fn create(reference_value: Decimal, new_value: Decimal) -> Self {
        let treat_zero_reference_value_as_one = reference_value.is_zero();
        let divisor = if treat_zero_reference_value_as_one {
            Decimal::ONE
        } else {
            reference_value
        };
        let percentage_change_value = new_value
            .checked_sub(reference_value)
            .and_then(|delta| delta.checked_div(divisor))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|raw| raw.round_dp_with_strategy(FRACTIONAL_DIGITS, RoundingStrategy::MidpointAwayFromZero))
            .unwrap_or_else(|| {
                if (new_value > reference_value) == divisor.is_sign_positive() {
                    Decimal::MAX
                } else {
                    Decimal::MIN
                }
            });

        Self {
            reference_value,
            new_value,
            percentage_change_value,
            treat_zero_reference_value_as_one,
        }
    }

    pub fn magnitude(&self) -> Decimal {
        self.percentage_change_value.abs()
    }

    /// Change expressed as improvement: for stats where lower is better
    /// (ERA, WHIP) a falling value is a positive improvement.
    pub fn improvement(&self, lower_is_better: bool) -> Decimal {
        if lower_is_better {
            -self.percentage_change_value
        } else {
            self.percentage_change_value
        }
    }

    pub fn has_increased_by(&self, threshold: Decimal) -> bool {
        self.new_value > self.reference_value && self.magnitude() >= threshold
    }

    pub fn has_decreased_by(&self, threshold: Decimal) -> bool {
        self.new_value < self.reference_value && self.magnitude() >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_reference_uses_one_as_divisor() {
        let change = PercentageChange::create(dec!(0), dec!(0.11));
        assert_eq!(change.percentage_change_value, dec!(11.0));
        assert!(change.treat_zero_reference_value_as_one);
    }

    #[test]
    fn test_both_zero_is_no_change() {
        let change = PercentageChange::create(dec!(0), dec!(0));
        assert_eq!(change.percentage_change_value, dec!(0));
        assert!(!change.has_increased_by(dec!(0.01)));
        assert!(!change.has_decreased_by(dec!(0.01)));
    }

    #[test]
    fn test_regular_change() {
        let change = PercentageChange::create(dec!(0.1), dec!(0.11));
        assert_eq!(change.percentage_change_value, dec!(10));
        assert!(!change.treat_zero_reference_value_as_one);

        let change = PercentageChange::create(dec!(200), dec!(150));
        assert_eq!(change.percentage_change_value, dec!(-25));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 1/3 -> 33.333..
        assert_eq!(
            PercentageChange::create(dec!(3), dec!(4)).percentage_change_value,
            dec!(33.33)
        );
        // 0.125% -> 0.13
        assert_eq!(
            PercentageChange::create(dec!(800), dec!(801)).percentage_change_value,
            dec!(0.13)
        );
        assert_eq!(
            PercentageChange::create(dec!(800), dec!(799)).percentage_change_value,
            dec!(-0.13)
        );
    }

    #[test]
    fn test_era_improvement_is_positive() {
        // 18 ER over 54 innings vs 15 ER over 27 innings
        let previous_era = dec!(15) * dec!(9) / dec!(27);
        let current_era = dec!(18) * dec!(9) / dec!(54);
        let change = PercentageChange::create(previous_era, current_era);

        assert_eq!(change.percentage_change_value, dec!(-40));
        assert_eq!(change.improvement(true), dec!(40));
        assert_eq!(change.magnitude(), dec!(40));
    }

    #[test]
    fn test_tiny_reference_saturates_instead_of_overflowing() {
        let smallest = Decimal::new(1, 28);
        let change = PercentageChange::create(smallest, dec!(1));
        assert_eq!(change.percentage_change_value, Decimal::MAX);
        assert!(!change.treat_zero_reference_value_as_one);
        assert!(change.has_increased_by(dec!(50)));

        let change = PercentageChange::create(smallest, dec!(-1));
        assert_eq!(change.percentage_change_value, Decimal::MIN);
        assert!(change.has_decreased_by(dec!(50)));
        assert_eq!(change.magnitude(), Decimal::MAX);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let change = PercentageChange::create(dec!(0.5), dec!(0.55));
        assert!(change.has_increased_by(dec!(10)));
        assert!(!change.has_increased_by(dec!(10.01)));
        assert!(!change.has_decreased_by(dec!(10)));
    }
}
