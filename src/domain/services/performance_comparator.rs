use crate::domain::values::percentage_change::PercentageChange;
use crate::domain::values::performance_score::PerformanceScore;
use rust_decimal::Decimal;
use serde::Serialize;

/// Previous-window score against current-window score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceScoreComparison {
    pub old_score: PerformanceScore,
    pub new_score: PerformanceScore,
    pub percentage_change_threshold: Decimal,
    pub percentage_change: PercentageChange,
}

impl PerformanceScoreComparison {
    pub fn is_significant_increase(&self) -> bool {
        self.percentage_change
            .has_increased_by(self.percentage_change_threshold)
    }

    pub fn is_significant_decrease(&self) -> bool {
        self.percentage_change
            .has_decreased_by(self.percentage_change_threshold)
    }
}

pub struct PerformanceComparator;

impl PerformanceComparator {
    pub fn compare(
        old_score: PerformanceScore,
        new_score: PerformanceScore,
        threshold: Decimal,
    ) -> PerformanceScoreComparison {
        PerformanceScoreComparison {
            old_score,
            new_score,
            percentage_change_threshold: threshold,
            percentage_change: PercentageChange::create(old_score.value(), new_score.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn score(v: Decimal) -> PerformanceScore {
        PerformanceScore::new(v).unwrap()
    }

    #[test]
    fn test_significant_increase() {
        let c = PerformanceComparator::compare(score(dec!(0.1)), score(dec!(0.5)), dec!(20));
        assert!(c.is_significant_increase());
        assert!(!c.is_significant_decrease());
        assert_eq!(c.percentage_change.percentage_change_value, dec!(400));
    }

    #[test]
    fn test_significant_decrease() {
        let c = PerformanceComparator::compare(score(dec!(0.5)), score(dec!(0.3)), dec!(20));
        assert!(c.is_significant_decrease());
        assert!(!c.is_significant_increase());
    }

    #[test]
    fn test_below_threshold_is_not_significant() {
        let c = PerformanceComparator::compare(score(dec!(0.5)), score(dec!(0.55)), dec!(20));
        assert!(!c.is_significant_increase());
        assert!(!c.is_significant_decrease());
    }

    #[test]
    fn test_zero_to_zero_is_no_change() {
        let c = PerformanceComparator::compare(PerformanceScore::zero(), PerformanceScore::zero(), dec!(0));
        assert_eq!(c.percentage_change.percentage_change_value, dec!(0));
        assert!(!c.is_significant_increase());
        assert!(!c.is_significant_decrease());
    }

    #[test]
    fn test_zero_baseline_never_panics() {
        let c = PerformanceComparator::compare(PerformanceScore::zero(), score(dec!(0.3)), dec!(20));
        assert!(c.percentage_change.treat_zero_reference_value_as_one);
        assert!(c.is_significant_increase());
    }

    #[test]
    fn test_smallest_baseline_saturates() {
        let c = PerformanceComparator::compare(score(Decimal::new(1, 28)), score(dec!(1)), dec!(10));
        assert_eq!(c.percentage_change.percentage_change_value, Decimal::MAX);
        assert!(c.is_significant_increase());
        assert!(!c.is_significant_decrease());
    }
}
