use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of days each kind of impact stays active after its effective date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastImpactDuration {
    pub player_activation: i64,
    pub player_deactivation: i64,
    pub player_free_agency: i64,
    pub player_team_signing: i64,
    pub boost: i64,
    pub position_change: i64,
    pub batting_stats_change: i64,
    pub pitching_stats_change: i64,
    pub fielding_stats_change: i64,
    pub overall_rating_change: i64,
}

impl ForecastImpactDuration {
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("player_activation", self.player_activation),
            ("player_deactivation", self.player_deactivation),
            ("player_free_agency", self.player_free_agency),
            ("player_team_signing", self.player_team_signing),
            ("boost", self.boost),
            ("position_change", self.position_change),
            ("batting_stats_change", self.batting_stats_change),
            ("pitching_stats_change", self.pitching_stats_change),
            ("fielding_stats_change", self.fielding_stats_change),
            ("overall_rating_change", self.overall_rating_change),
        ];
        for (name, days) in fields {
            if days < 0 {
                return Err(DomainError::Config(format!(
                    "Impact duration {name} cannot be negative, got {days}"
                )));
            }
        }
        Ok(())
    }
}
