use crate::domain::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatGroup {
    Batting,
    Pitching,
    Fielding,
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatGroup::Batting => write!(f, "batting"),
            StatGroup::Pitching => write!(f, "pitching"),
            StatGroup::Fielding => write!(f, "fielding"),
        }
    }
}

impl FromStr for StatGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batting" => Ok(StatGroup::Batting),
            "pitching" => Ok(StatGroup::Pitching),
            "fielding" => Ok(StatGroup::Fielding),
            _ => Err(format!("Unknown stat group: {s}")),
        }
    }
}

/// How a single stat is normalized and weighted. Bounds come from historical
/// MLB data, not from the sample being scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinMaxStatCriteria {
    pub stat_key: String,
    pub min: Decimal,
    pub max: Decimal,
    pub weight: Decimal,
    pub lower_is_better: bool,
}

impl MinMaxStatCriteria {
    pub fn new(
        stat_key: impl Into<String>,
        min: Decimal,
        max: Decimal,
        weight: Decimal,
        lower_is_better: bool,
    ) -> Result<Self, DomainError> {
        let stat_key = stat_key.into();
        if stat_key.trim().is_empty() {
            return Err(DomainError::InvalidMinMaxStatCriteria(
                "Stat key cannot be empty".to_string(),
            ));
        }
        if weight < Decimal::ZERO || weight > Decimal::ONE {
            return Err(DomainError::InvalidMinMaxStatCriteria(format!(
                "Weight for {stat_key} must be between 0 and 1, got {weight}"
            )));
        }
        if min >= max {
            return Err(DomainError::InvalidMinMaxStatCriteria(format!(
                "Min for {stat_key} must be smaller than max ({min} >= {max})"
            )));
        }
        if max.checked_sub(min).is_none() {
            return Err(DomainError::InvalidMinMaxStatCriteria(format!(
                "Range of {stat_key} is too wide ({min} to {max})"
            )));
        }
        Ok(Self {
            stat_key,
            min,
            max,
            weight,
            lower_is_better,
        })
    }

    /// Min-max normalizes `value` into [0, 1], inverted when lower is better.
    pub fn normalize(&self, value: Decimal) -> Decimal {
        // Clamping first keeps the quotient in [0, 1] for any input
        let offset = value.clamp(self.min, self.max) - self.min;
        let normalized = offset / (self.max - self.min);
        if self.lower_is_better {
            Decimal::ONE - normalized
        } else {
            normalized
        }
    }
}

#[derive(Deserialize)]
struct RawStatCriteria {
    stat_key: String,
    min: Decimal,
    max: Decimal,
    weight: Decimal,
    #[serde(default)]
    lower_is_better: bool,
}

impl<'de> Deserialize<'de> for MinMaxStatCriteria {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStatCriteria::deserialize(deserializer)?;
        MinMaxStatCriteria::new(raw.stat_key, raw.min, raw.max, raw.weight, raw.lower_is_better)
            .map_err(serde::de::Error::custom)
    }
}

/// The three criteria sets. Each set's weights sum to exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinMaxNormalizationCriteria {
    batting: Vec<MinMaxStatCriteria>,
    pitching: Vec<MinMaxStatCriteria>,
    fielding: Vec<MinMaxStatCriteria>,
}

impl MinMaxNormalizationCriteria {
    pub fn new(
        batting: Vec<MinMaxStatCriteria>,
        pitching: Vec<MinMaxStatCriteria>,
        fielding: Vec<MinMaxStatCriteria>,
    ) -> Result<Self, DomainError> {
        let batting_sum = weight_sum(&batting);
        let pitching_sum = weight_sum(&pitching);
        let fielding_sum = weight_sum(&fielding);
        if batting_sum != Decimal::ONE || pitching_sum != Decimal::ONE || fielding_sum != Decimal::ONE
        {
            return Err(DomainError::InvalidMinMaxNormalizationCriteria {
                batting: batting_sum.normalize(),
                pitching: pitching_sum.normalize(),
                fielding: fielding_sum.normalize(),
            });
        }

        for (group, criteria) in [
            (StatGroup::Batting, &batting),
            (StatGroup::Pitching, &pitching),
            (StatGroup::Fielding, &fielding),
        ] {
            let mut seen = HashSet::new();
            for c in criteria {
                if !seen.insert(c.stat_key.as_str()) {
                    return Err(DomainError::InvalidMinMaxStatCriteria(format!(
                        "Duplicate {group} stat: {}",
                        c.stat_key
                    )));
                }
            }
        }

        Ok(Self {
            batting,
            pitching,
            fielding,
        })
    }

    pub fn for_group(&self, group: StatGroup) -> &[MinMaxStatCriteria] {
        match group {
            StatGroup::Batting => &self.batting,
            StatGroup::Pitching => &self.pitching,
            StatGroup::Fielding => &self.fielding,
        }
    }
}

fn weight_sum(criteria: &[MinMaxStatCriteria]) -> Decimal {
    criteria.iter().map(|c| c.weight).sum()
}

#[derive(Deserialize)]
struct RawNormalizationCriteria {
    batting: Vec<MinMaxStatCriteria>,
    pitching: Vec<MinMaxStatCriteria>,
    fielding: Vec<MinMaxStatCriteria>,
}

impl<'de> Deserialize<'de> for MinMaxNormalizationCriteria {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNormalizationCriteria::deserialize(deserializer)?;
        MinMaxNormalizationCriteria::new(raw.batting, raw.pitching, raw.fielding)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn criteria(key: &str, weight: Decimal) -> MinMaxStatCriteria {
        MinMaxStatCriteria::new(key, dec!(0), dec!(10), weight, false).unwrap()
    }

    #[test]
    fn test_weight_out_of_range() {
        let err = MinMaxStatCriteria::new("hr", dec!(0), dec!(60), dec!(1.1), false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidMinMaxStatCriteria(_)));
        assert!(MinMaxStatCriteria::new("hr", dec!(0), dec!(60), dec!(-0.1), false).is_err());
    }

    #[test]
    fn test_min_must_be_below_max() {
        assert!(MinMaxStatCriteria::new("era", dec!(5), dec!(5), dec!(0.5), true).is_err());
        assert!(MinMaxStatCriteria::new("era", dec!(6), dec!(5), dec!(0.5), true).is_err());
    }

    #[test]
    fn test_range_must_be_representable() {
        let err = MinMaxStatCriteria::new("ops", Decimal::MIN, Decimal::MAX, dec!(0.5), false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidMinMaxStatCriteria(_)));
    }

    #[test]
    fn test_weight_sums_reported_per_group() {
        let err = MinMaxNormalizationCriteria::new(
            vec![criteria("obp", dec!(0.5)), criteria("slg", dec!(0.4))],
            vec![criteria("era", dec!(1.0))],
            vec![criteria("fpct", dec!(1))],
        )
        .unwrap_err();

        match err {
            DomainError::InvalidMinMaxNormalizationCriteria {
                batting,
                pitching,
                fielding,
            } => {
                assert_eq!(batting, dec!(0.9));
                assert_eq!(pitching, dec!(1.0));
                assert_eq!(fielding, dec!(1.0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_group_sums_to_zero() {
        let err = MinMaxNormalizationCriteria::new(
            vec![criteria("obp", dec!(1))],
            vec![],
            vec![criteria("fpct", dec!(1))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidMinMaxNormalizationCriteria { pitching, .. } if pitching.is_zero()
        ));
    }

    #[test]
    fn test_duplicate_stat_key_rejected() {
        let err = MinMaxNormalizationCriteria::new(
            vec![criteria("obp", dec!(0.5)), criteria("obp", dec!(0.5))],
            vec![criteria("era", dec!(1))],
            vec![criteria("fpct", dec!(1))],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidMinMaxStatCriteria(_)));
    }

    #[test]
    fn test_normalize_clamps_and_inverts() {
        let hr = MinMaxStatCriteria::new("hr", dec!(0), dec!(50), dec!(1), false).unwrap();
        assert_eq!(hr.normalize(dec!(25)), dec!(0.5));
        assert_eq!(hr.normalize(dec!(70)), dec!(1));
        assert_eq!(hr.normalize(dec!(-3)), dec!(0));

        let era = MinMaxStatCriteria::new("era", dec!(1), dec!(9), dec!(1), true).unwrap();
        assert_eq!(era.normalize(dec!(3)), dec!(0.75));
        assert_eq!(era.normalize(dec!(0.5)), dec!(1));
        assert_eq!(era.normalize(dec!(12)), dec!(0));
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"stat_key":"hr","min":"10","max":"5","weight":"0.5"}"#;
        assert!(serde_json::from_str::<MinMaxStatCriteria>(bad).is_err());

        let good = r#"{"stat_key":"era","min":"0","max":"9","weight":"0.5","lower_is_better":true}"#;
        let parsed: MinMaxStatCriteria = serde_json::from_str(good).unwrap();
        assert!(parsed.lower_is_better);
    }
}
