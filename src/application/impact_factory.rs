//! Translation of upstream events into forecast impacts.
//!
//! Every event kind maps to exactly one impact constructor. Adding an event
//! kind without handling it here is a compile error.

use crate::domain::entities::forecast_impact::{AdministrativeKind, ForecastImpact};
use crate::domain::error::DomainError;
use crate::domain::services::stat_normalizer::StatNormalizer;
use crate::domain::values::impact_duration::ForecastImpactDuration;
use crate::domain::values::overall_rating::OverallRating;
use crate::domain::values::performance_score::PerformanceScore;
use crate::domain::values::position::Position;
use crate::domain::values::position_scarcity::PositionScarcity;
use crate::domain::values::stat_criteria::StatGroup;
use crate::domain::values::thresholds::StatsChangeThresholds;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stat window given either as an already computed score or as raw stats
/// still to be normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatWindow {
    Score(PerformanceScore),
    Stats(HashMap<String, Decimal>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ForecastImpactEvent {
    PlayerActivation {
        date: NaiveDate,
    },
    PlayerDeactivation {
        date: NaiveDate,
    },
    PlayerFreeAgency {
        date: NaiveDate,
    },
    PlayerTeamSigning {
        date: NaiveDate,
    },
    Boost {
        reason: String,
        start_date: NaiveDate,
        #[serde(default)]
        end_date: Option<NaiveDate>,
    },
    PositionChange {
        date: NaiveDate,
        old_position: Position,
        new_position: Position,
    },
    BattingStatsChange {
        date: NaiveDate,
        previous: StatWindow,
        current: StatWindow,
    },
    PitchingStatsChange {
        date: NaiveDate,
        previous: StatWindow,
        current: StatWindow,
    },
    FieldingStatsChange {
        date: NaiveDate,
        previous: StatWindow,
        current: StatWindow,
    },
    OverallRatingChange {
        date: NaiveDate,
        old_rating: OverallRating,
        new_rating: OverallRating,
    },
}

pub struct ImpactFactory {
    durations: ForecastImpactDuration,
    thresholds: StatsChangeThresholds,
    scarcity: PositionScarcity,
    normalizer: StatNormalizer,
}

impl ImpactFactory {
    pub fn new(
        durations: ForecastImpactDuration,
        thresholds: StatsChangeThresholds,
        scarcity: PositionScarcity,
        normalizer: StatNormalizer,
    ) -> Self {
        Self {
            durations,
            thresholds,
            scarcity,
            normalizer,
        }
    }

    pub fn normalizer(&self) -> &StatNormalizer {
        &self.normalizer
    }

    pub fn create_impact(&self, event: &ForecastImpactEvent) -> Result<ForecastImpact, DomainError> {
        match event {
            ForecastImpactEvent::PlayerActivation { date } => {
                self.administrative(AdministrativeKind::PlayerActivation, *date)
            }
            ForecastImpactEvent::PlayerDeactivation { date } => {
                self.administrative(AdministrativeKind::PlayerDeactivation, *date)
            }
            ForecastImpactEvent::PlayerFreeAgency { date } => {
                self.administrative(AdministrativeKind::PlayerFreeAgency, *date)
            }
            ForecastImpactEvent::PlayerTeamSigning { date } => {
                self.administrative(AdministrativeKind::PlayerTeamSigning, *date)
            }
            ForecastImpactEvent::Boost {
                reason,
                start_date,
                end_date,
            } => {
                let end_date = match end_date {
                    Some(end) => *end,
                    None => self.default_boost_end(*start_date)?,
                };
                ForecastImpact::boost(reason.clone(), *start_date, end_date)
            }
            ForecastImpactEvent::PositionChange {
                date,
                old_position,
                new_position,
            } => ForecastImpact::position_change(
                *old_position,
                *new_position,
                *date,
                &self.durations,
                &self.scarcity,
            ),
            ForecastImpactEvent::BattingStatsChange {
                date,
                previous,
                current,
            } => self.stats_change(StatGroup::Batting, *date, previous, current),
            ForecastImpactEvent::PitchingStatsChange {
                date,
                previous,
                current,
            } => self.stats_change(StatGroup::Pitching, *date, previous, current),
            ForecastImpactEvent::FieldingStatsChange {
                date,
                previous,
                current,
            } => self.stats_change(StatGroup::Fielding, *date, previous, current),
            ForecastImpactEvent::OverallRatingChange {
                date,
                old_rating,
                new_rating,
            } => ForecastImpact::overall_rating_change(*old_rating, *new_rating, *date, &self.durations),
        }
    }

    pub fn create_impacts(&self, events: &[ForecastImpactEvent]) -> Result<Vec<ForecastImpact>, DomainError> {
        events.iter().map(|e| self.create_impact(e)).collect()
    }

    fn administrative(&self, kind: AdministrativeKind, date: NaiveDate) -> Result<ForecastImpact, DomainError> {
        ForecastImpact::administrative(kind, date, &self.durations)
    }

    fn default_boost_end(&self, start_date: NaiveDate) -> Result<NaiveDate, DomainError> {
        let days = u64::try_from(self.durations.boost)
            .map_err(|_| DomainError::Config(format!("Negative boost duration: {}", self.durations.boost)))?;
        start_date
            .checked_add_days(Days::new(days))
            .ok_or_else(|| DomainError::InvalidInput(format!("Boost end overflows from {start_date}")))
    }

    fn stats_change(
        &self,
        group: StatGroup,
        date: NaiveDate,
        previous: &StatWindow,
        current: &StatWindow,
    ) -> Result<ForecastImpact, DomainError> {
        let old_score = self.score_window(group, previous)?;
        let new_score = self.score_window(group, current)?;
        ForecastImpact::stats_change(
            group,
            old_score,
            new_score,
            date,
            &self.durations,
            self.thresholds.for_group(group),
        )
    }

    fn score_window(&self, group: StatGroup, window: &StatWindow) -> Result<PerformanceScore, DomainError> {
        match window {
            StatWindow::Score(score) => Ok(*score),
            StatWindow::Stats(values) => self.normalizer.score(group, values),
        }
    }
}
