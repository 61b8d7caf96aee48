use crate::domain::entities::player_card_forecast::PlayerCardForecast;
use crate::domain::error::DomainError;
use crate::domain::ports::forecast_repository::ForecastRepository;
use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use chrono::NaiveDate;
use std::sync::Arc;

/// How a caller identifies the forecast it wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastLookup {
    Card(CardExternalId),
    Mlb(MlbId),
}

pub struct ForecastQueryUseCase {
    repo: Arc<dyn ForecastRepository>,
}

impl ForecastQueryUseCase {
    pub fn new(repo: Arc<dyn ForecastRepository>) -> Self {
        Self { repo }
    }

    pub fn get_forecast(
        &self,
        year: SeasonYear,
        lookup: ForecastLookup,
    ) -> Result<Option<PlayerCardForecast>, DomainError> {
        match lookup {
            ForecastLookup::Card(card_id) => self.repo.get_by_card(year, card_id),
            ForecastLookup::Mlb(mlb_id) => self.repo.get_by_mlb_id(year, mlb_id),
        }
    }

    pub fn get_impacted_forecasts(&self, date: NaiveDate) -> Result<Vec<PlayerCardForecast>, DomainError> {
        self.repo.get_impacted_forecasts(date)
    }
}
