use crate::domain::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bundle of stats normalized onto the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct PerformanceScore(Decimal);

impl PerformanceScore {
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(DomainError::PerformanceScoreOutOfRange(value));
        }
        Ok(PerformanceScore(value))
    }

    pub fn zero() -> Self {
        PerformanceScore(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for PerformanceScore {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        PerformanceScore::new(value)
    }
}

impl From<PerformanceScore> for Decimal {
    fn from(score: PerformanceScore) -> Self {
        score.0
    }
}

impl fmt::Display for PerformanceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
