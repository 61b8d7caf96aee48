use crate::domain::error::DomainError;
use crate::domain::values::demand::Demand;
use crate::domain::values::percentage_change::PercentageChange;
use crate::domain::values::stat_criteria::StatGroup;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Percentage-change cut points for classifying a score movement.
///
/// `|change| <= low` is `Stable`; `low < |change| < high` is `Gain`/`Low`
/// depending on direction; `|change| >= high` is `High`/`Loss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemandThresholds {
    low: Decimal,
    high: Decimal,
}

impl DemandThresholds {
    pub fn new(low: Decimal, high: Decimal) -> Result<Self, DomainError> {
        if low < Decimal::ZERO {
            return Err(DomainError::InvalidThresholds(format!(
                "Low threshold cannot be negative, got {low}"
            )));
        }
        if low >= high {
            return Err(DomainError::InvalidThresholds(format!(
                "Low threshold {low} must be below high threshold {high}"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Decimal {
        self.low
    }

    pub fn high(&self) -> Decimal {
        self.high
    }

    pub fn classify(&self, change: &PercentageChange) -> Demand {
        let magnitude = change.magnitude();
        let increased = change.percentage_change_value > Decimal::ZERO;
        if magnitude <= self.low {
            Demand::Stable
        } else if magnitude < self.high {
            if increased {
                Demand::Gain
            } else {
                Demand::Low
            }
        } else if increased {
            Demand::High
        } else {
            Demand::Loss
        }
    }
}

#[derive(Deserialize)]
struct RawThresholds {
    low: Decimal,
    high: Decimal,
}

impl<'de> Deserialize<'de> for DemandThresholds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawThresholds::deserialize(deserializer)?;
        DemandThresholds::new(raw.low, raw.high).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsChangeThresholds {
    pub batting: DemandThresholds,
    pub pitching: DemandThresholds,
    pub fielding: DemandThresholds,
}

impl StatsChangeThresholds {
    pub fn for_group(&self, group: StatGroup) -> &DemandThresholds {
        match group {
            StatGroup::Batting => &self.batting,
            StatGroup::Pitching => &self.pitching,
            StatGroup::Fielding => &self.fielding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn thresholds() -> DemandThresholds {
        DemandThresholds::new(dec!(10), dec!(50)).unwrap()
    }

    #[test]
    fn test_low_must_be_below_high() {
        assert!(DemandThresholds::new(dec!(50), dec!(50)).is_err());
        assert!(DemandThresholds::new(dec!(-1), dec!(50)).is_err());
    }

    #[test]
    fn test_change_at_low_threshold_is_stable() {
        let change = PercentageChange::create(dec!(0.1), dec!(0.11));
        assert_eq!(thresholds().classify(&change), Demand::Stable);
    }

    #[test]
    fn test_two_tier_classification() {
        let t = thresholds();
        assert_eq!(t.classify(&PercentageChange::create(dec!(1), dec!(1.2))), Demand::Gain);
        assert_eq!(t.classify(&PercentageChange::create(dec!(1), dec!(0.8))), Demand::Low);
        assert_eq!(t.classify(&PercentageChange::create(dec!(1), dec!(1.5))), Demand::High);
        assert_eq!(t.classify(&PercentageChange::create(dec!(1), dec!(0.4))), Demand::Loss);
    }
}
