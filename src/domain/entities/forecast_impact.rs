//! Time-bounded facts that each carry their own demand label.
//!
//! Every constructor is a pure function of its inputs. Nothing here combines
//! several active impacts into one demand value; that is left to reporting.

use crate::domain::error::DomainError;
use crate::domain::values::demand::Demand;
use crate::domain::values::impact_duration::ForecastImpactDuration;
use crate::domain::values::overall_rating::OverallRating;
use crate::domain::values::percentage_change::PercentageChange;
use crate::domain::values::performance_score::PerformanceScore;
use crate::domain::values::position::Position;
use crate::domain::values::position_scarcity::PositionScarcity;
use crate::domain::values::stat_criteria::StatGroup;
use crate::domain::values::thresholds::DemandThresholds;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrativeKind {
    PlayerActivation,
    PlayerDeactivation,
    PlayerFreeAgency,
    PlayerTeamSigning,
}

impl AdministrativeKind {
    pub fn demand(&self) -> Demand {
        match self {
            AdministrativeKind::PlayerDeactivation | AdministrativeKind::PlayerFreeAgency => {
                Demand::Loss
            }
            AdministrativeKind::PlayerActivation | AdministrativeKind::PlayerTeamSigning => {
                Demand::Low
            }
        }
    }

    pub fn duration_days(&self, durations: &ForecastImpactDuration) -> i64 {
        match self {
            AdministrativeKind::PlayerActivation => durations.player_activation,
            AdministrativeKind::PlayerDeactivation => durations.player_deactivation,
            AdministrativeKind::PlayerFreeAgency => durations.player_free_agency,
            AdministrativeKind::PlayerTeamSigning => durations.player_team_signing,
        }
    }
}

/// What produced an impact, with the inputs its demand was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImpactKind {
    Administrative {
        kind: AdministrativeKind,
    },
    Boost {
        reason: String,
    },
    PositionChange {
        old_position: Position,
        new_position: Position,
    },
    StatsChange {
        group: StatGroup,
        old_score: PerformanceScore,
        new_score: PerformanceScore,
    },
    OverallRatingChange {
        old_rating: OverallRating,
        new_rating: OverallRating,
    },
}

impl ImpactKind {
    /// Stable name of the fact kind, used for storage and de-duplication.
    pub fn discriminator(&self) -> &'static str {
        match self {
            ImpactKind::Administrative { kind } => match kind {
                AdministrativeKind::PlayerActivation => "player_activation",
                AdministrativeKind::PlayerDeactivation => "player_deactivation",
                AdministrativeKind::PlayerFreeAgency => "player_free_agency",
                AdministrativeKind::PlayerTeamSigning => "player_team_signing",
            },
            ImpactKind::Boost { .. } => "boost",
            ImpactKind::PositionChange { .. } => "position_change",
            ImpactKind::StatsChange { group, .. } => match group {
                StatGroup::Batting => "batting_stats_change",
                StatGroup::Pitching => "pitching_stats_change",
                StatGroup::Fielding => "fielding_stats_change",
            },
            ImpactKind::OverallRatingChange { .. } => "overall_rating_change",
        }
    }
}

impl fmt::Display for ImpactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.discriminator())
    }
}

/// Caller-side dedupe key: one impact per kind and start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImpactKey {
    pub kind: &'static str,
    pub start_date: NaiveDate,
}

impl fmt::Display for ImpactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.start_date)
    }
}

impl FromStr for AdministrativeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player_activation" => Ok(AdministrativeKind::PlayerActivation),
            "player_deactivation" => Ok(AdministrativeKind::PlayerDeactivation),
            "player_free_agency" => Ok(AdministrativeKind::PlayerFreeAgency),
            "player_team_signing" => Ok(AdministrativeKind::PlayerTeamSigning),
            _ => Err(format!("Unknown administrative impact: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastImpact {
    pub kind: ImpactKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub demand: Demand,
}

impl ForecastImpact {
    /// Builds an impact from already-derived parts. Used when rehydrating
    /// from storage; the variant constructors below are the normal path.
    pub fn from_parts(
        kind: ImpactKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        demand: Demand,
    ) -> Result<Self, DomainError> {
        if start_date > end_date {
            return Err(DomainError::InvalidImpactWindow {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            kind,
            start_date,
            end_date,
            demand,
        })
    }

    pub fn administrative(
        kind: AdministrativeKind,
        effective_date: NaiveDate,
        durations: &ForecastImpactDuration,
    ) -> Result<Self, DomainError> {
        let end_date = add_days(effective_date, kind.duration_days(durations))?;
        Self::from_parts(
            ImpactKind::Administrative { kind },
            effective_date,
            end_date,
            kind.demand(),
        )
    }

    pub fn boost(
        reason: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        Self::from_parts(
            ImpactKind::Boost {
                reason: reason.into(),
            },
            start_date,
            end_date,
            Demand::High,
        )
    }

    pub fn position_change(
        old_position: Position,
        new_position: Position,
        effective_date: NaiveDate,
        durations: &ForecastImpactDuration,
        scarcity: &PositionScarcity,
    ) -> Result<Self, DomainError> {
        let end_date = add_days(effective_date, durations.position_change)?;
        Self::from_parts(
            ImpactKind::PositionChange {
                old_position,
                new_position,
            },
            effective_date,
            end_date,
            scarcity.demand_for_change(old_position, new_position),
        )
    }

    pub fn stats_change(
        group: StatGroup,
        old_score: PerformanceScore,
        new_score: PerformanceScore,
        effective_date: NaiveDate,
        durations: &ForecastImpactDuration,
        thresholds: &DemandThresholds,
    ) -> Result<Self, DomainError> {
        let days = match group {
            StatGroup::Batting => durations.batting_stats_change,
            StatGroup::Pitching => durations.pitching_stats_change,
            StatGroup::Fielding => durations.fielding_stats_change,
        };
        let end_date = add_days(effective_date, days)?;
        let change = PercentageChange::create(old_score.value(), new_score.value());
        Self::from_parts(
            ImpactKind::StatsChange {
                group,
                old_score,
                new_score,
            },
            effective_date,
            end_date,
            thresholds.classify(&change),
        )
    }

    pub fn overall_rating_change(
        old_rating: OverallRating,
        new_rating: OverallRating,
        effective_date: NaiveDate,
        durations: &ForecastImpactDuration,
    ) -> Result<Self, DomainError> {
        let end_date = add_days(effective_date, durations.overall_rating_change)?;
        let demand = match new_rating.rarity().cmp(&old_rating.rarity()) {
            std::cmp::Ordering::Greater => Demand::Gain,
            std::cmp::Ordering::Less => Demand::Loss,
            std::cmp::Ordering::Equal => Demand::Stable,
        };
        Self::from_parts(
            ImpactKind::OverallRatingChange {
                old_rating,
                new_rating,
            },
            effective_date,
            end_date,
            demand,
        )
    }

    /// Inclusive on both ends.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn key(&self) -> ImpactKey {
        ImpactKey {
            kind: self.kind.discriminator(),
            start_date: self.start_date,
        }
    }

    pub fn window_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Score movement for stat impacts, `None` for every other kind.
    pub fn percentage_change(&self) -> Option<PercentageChange> {
        match &self.kind {
            ImpactKind::StatsChange {
                old_score,
                new_score,
                ..
            } => Some(PercentageChange::create(old_score.value(), new_score.value())),
            _ => None,
        }
    }

    pub fn is_improvement(&self) -> Option<bool> {
        self.percentage_change()
            .map(|c| c.percentage_change_value > Decimal::ZERO)
    }
}

#[derive(Deserialize)]
struct RawForecastImpact {
    kind: ImpactKind,
    start_date: NaiveDate,
    end_date: NaiveDate,
    demand: Demand,
}

impl<'de> Deserialize<'de> for ForecastImpact {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawForecastImpact::deserialize(deserializer)?;
        ForecastImpact::from_parts(raw.kind, raw.start_date, raw.end_date, raw.demand)
            .map_err(serde::de::Error::custom)
    }
}

fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DomainError> {
    let days = u64::try_from(days)
        .map_err(|_| DomainError::InvalidInput(format!("Impact duration cannot be negative: {days}")))?;
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| DomainError::InvalidInput(format!("Date overflow adding {days} days to {date}")))
}
