//! Min-max scoring of raw stat values.
//!
//! Heterogeneous stats (ERA, home runs, fielding percentage) are brought onto
//! one scale before any cross-stat judgment is made:
//!
//! - `normalized = (x - min) / (max - min)`, clamped to [0, 1]
//! - `1 - normalized` when a lower value is better
//! - `score = Σ weight · normalized` over the group's criteria
//!
//! Bounds are fixed domain constants rather than sample statistics, so a
//! given stat line scores the same in every season.

use crate::domain::error::DomainError;
use crate::domain::values::performance_score::PerformanceScore;
use crate::domain::values::stat_criteria::{MinMaxNormalizationCriteria, StatGroup};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct StatNormalizer {
    criteria: MinMaxNormalizationCriteria,
}

impl StatNormalizer {
    pub fn new(criteria: MinMaxNormalizationCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &MinMaxNormalizationCriteria {
        &self.criteria
    }

    /// Scores a stat line. An empty line (no appearances in the window)
    /// scores zero.
    pub fn score(
        &self,
        group: StatGroup,
        values: &HashMap<String, Decimal>,
    ) -> Result<PerformanceScore, DomainError> {
        if values.is_empty() {
            return Ok(PerformanceScore::zero());
        }

        let criteria = self.criteria.for_group(group);

        if let Some(unknown) = values
            .keys()
            .find(|key| !criteria.iter().any(|c| &c.stat_key == *key))
        {
            return Err(DomainError::UnexpectedMinMaxStatType(format!(
                "{unknown} is not a configured {group} stat"
            )));
        }

        let mut score = Decimal::ZERO;
        for c in criteria {
            let value = values
                .get(&c.stat_key)
                .ok_or_else(|| DomainError::MissingStatValue(format!("{group} {}", c.stat_key)))?;
            score += c.weight * c.normalize(*value);
        }

        // Weights sum to 1, so only rounding noise can push past the bounds
        PerformanceScore::new(score.clamp(Decimal::ZERO, Decimal::ONE))
    }
}
