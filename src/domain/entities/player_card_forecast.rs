use crate::domain::entities::forecast_impact::{ForecastImpact, ImpactKey, ImpactKind};
use crate::domain::error::DomainError;
use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use crate::domain::values::overall_rating::OverallRating;
use crate::domain::values::position::Position;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One tradable card's impact history for a season.
///
/// Impacts are append-only. The aggregate does not de-duplicate: callers that
/// may see the same event twice must check [`PlayerCardForecast::has_impact`]
/// with the impact's `(kind, start_date)` key before appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCardForecast {
    pub id: String,
    pub year: SeasonYear,
    pub card_external_id: CardExternalId,
    pub mlb_id: Option<MlbId>,
    pub primary_position: Position,
    pub overall_rating: OverallRating,
    pub impacts: Vec<ForecastImpact>,
    /// Bumped on every successful save. Stale writes are rejected.
    pub version: u64,
}

impl PlayerCardForecast {
    pub fn create(
        year: SeasonYear,
        card_external_id: CardExternalId,
        mlb_id: Option<MlbId>,
        primary_position: Position,
        overall_rating: OverallRating,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            year,
            card_external_id,
            mlb_id,
            primary_position,
            overall_rating,
            impacts: Vec::new(),
            version: 0,
        }
    }

    pub fn add_impacts(&mut self, impacts: impl IntoIterator<Item = ForecastImpact>) {
        for impact in impacts {
            match &impact.kind {
                ImpactKind::PositionChange { new_position, .. } => {
                    self.primary_position = *new_position;
                }
                ImpactKind::OverallRatingChange { new_rating, .. } => {
                    self.overall_rating = *new_rating;
                }
                _ => {}
            }
            self.impacts.push(impact);
        }
    }

    /// Records the real-world player once matched. Setting the same id again
    /// is a no-op; a different id is rejected.
    pub fn set_mlb_id(&mut self, mlb_id: MlbId) -> Result<(), DomainError> {
        match self.mlb_id {
            None => {
                self.mlb_id = Some(mlb_id);
                Ok(())
            }
            Some(existing) if existing == mlb_id => Ok(()),
            Some(existing) => Err(DomainError::InvalidInput(format!(
                "Card {} is already matched to MLB id {existing}, cannot rematch to {mlb_id}",
                self.card_external_id
            ))),
        }
    }

    /// True if any impact window contains `date`, both ends inclusive.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.impacts.iter().any(|i| i.is_active_on(date))
    }

    pub fn active_impacts_on(&self, date: NaiveDate) -> Vec<&ForecastImpact> {
        self.impacts.iter().filter(|i| i.is_active_on(date)).collect()
    }

    /// Sorted by start date. Insertion order breaks ties.
    pub fn impacts_chronologically(&self) -> Vec<&ForecastImpact> {
        let mut sorted: Vec<&ForecastImpact> = self.impacts.iter().collect();
        sorted.sort_by_key(|i| i.start_date);
        sorted
    }

    pub fn has_impact(&self, key: &ImpactKey) -> bool {
        self.impacts.iter().any(|i| &i.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::forecast_impact::AdministrativeKind;
    use crate::domain::values::impact_duration::ForecastImpactDuration;
    use crate::domain::values::position_scarcity::PositionScarcity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn forecast() -> PlayerCardForecast {
        PlayerCardForecast::create(
            SeasonYear::new(2024).unwrap(),
            CardExternalId::new(uuid::Uuid::new_v4()),
            None,
            Position::RightField,
            OverallRating::new(80).unwrap(),
        )
    }

    fn durations() -> ForecastImpactDuration {
        ForecastImpactDuration {
            player_activation: 3,
            player_deactivation: 7,
            player_free_agency: 5,
            player_team_signing: 3,
            boost: 10,
            position_change: 4,
            batting_stats_change: 6,
            pitching_stats_change: 6,
            fielding_stats_change: 6,
            overall_rating_change: 7,
        }
    }

    #[test]
    fn test_new_forecast_is_empty() {
        let f = forecast();
        assert!(f.impacts.is_empty());
        assert_eq!(f.version, 0);
        assert!(!f.is_active_on(date(2024, 6, 1)));
    }

    #[test]
    fn test_is_active_on_boundaries() {
        let mut f = forecast();
        f.add_impacts(vec![
            ForecastImpact::boost("Walk-off", date(2024, 6, 1), date(2024, 6, 5)).unwrap(),
        ]);
        assert!(!f.is_active_on(date(2024, 5, 31)));
        assert!(f.is_active_on(date(2024, 6, 1)));
        assert!(f.is_active_on(date(2024, 6, 3)));
        assert!(f.is_active_on(date(2024, 6, 5)));
        assert!(!f.is_active_on(date(2024, 6, 6)));
    }

    #[test]
    fn test_add_impacts_does_not_dedupe() {
        let mut f = forecast();
        let impact = ForecastImpact::administrative(
            AdministrativeKind::PlayerActivation,
            date(2024, 4, 1),
            &durations(),
        )
        .unwrap();
        f.add_impacts(vec![impact.clone(), impact.clone()]);
        assert_eq!(f.impacts.len(), 2);
        assert!(f.has_impact(&impact.key()));
    }

    #[test]
    fn test_position_change_updates_primary_position() {
        let mut f = forecast();
        let impact = ForecastImpact::position_change(
            Position::RightField,
            Position::FirstBase,
            date(2024, 5, 1),
            &durations(),
            &PositionScarcity::default(),
        )
        .unwrap();
        f.add_impacts(vec![impact]);
        assert_eq!(f.primary_position, Position::FirstBase);
    }

    #[test]
    fn test_rating_change_updates_overall_rating() {
        let mut f = forecast();
        let impact = ForecastImpact::overall_rating_change(
            OverallRating::new(80).unwrap(),
            OverallRating::new(86).unwrap(),
            date(2024, 5, 1),
            &durations(),
        )
        .unwrap();
        f.add_impacts(vec![impact]);
        assert_eq!(f.overall_rating.value(), 86);
    }

    #[test]
    fn test_active_impacts_are_listed_not_combined() {
        let mut f = forecast();
        f.add_impacts(vec![
            ForecastImpact::boost("A", date(2024, 6, 1), date(2024, 6, 10)).unwrap(),
            ForecastImpact::administrative(
                AdministrativeKind::PlayerDeactivation,
                date(2024, 6, 5),
                &durations(),
            )
            .unwrap(),
            ForecastImpact::boost("B", date(2024, 7, 1), date(2024, 7, 2)).unwrap(),
        ]);
        let active = f.active_impacts_on(date(2024, 6, 6));
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn test_impacts_chronologically() {
        let mut f = forecast();
        f.add_impacts(vec![
            ForecastImpact::boost("Later", date(2024, 8, 1), date(2024, 8, 2)).unwrap(),
            ForecastImpact::boost("Earlier", date(2024, 4, 1), date(2024, 4, 2)).unwrap(),
        ]);
        let sorted = f.impacts_chronologically();
        assert_eq!(sorted[0].start_date, date(2024, 4, 1));
        assert_eq!(sorted[1].start_date, date(2024, 8, 1));
    }

    #[test]
    fn test_mlb_id_set_once() {
        let mut f = forecast();
        let id = MlbId::new(660271).unwrap();
        f.set_mlb_id(id).unwrap();
        f.set_mlb_id(id).unwrap();
        assert_eq!(f.mlb_id, Some(id));
        assert!(f.set_mlb_id(MlbId::new(1).unwrap()).is_err());
        assert_eq!(f.mlb_id, Some(id));
    }
}
