use crate::domain::entities::player_card_forecast::PlayerCardForecast;
use crate::domain::error::DomainError;
use crate::domain::ports::forecast_repository::ForecastRepository;
use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use crate::domain::values::overall_rating::OverallRating;
use crate::domain::values::position::Position;
use log::{debug, info};
use std::sync::Arc;

pub struct CreateForecastUseCase {
    repo: Arc<dyn ForecastRepository>,
}

impl CreateForecastUseCase {
    pub fn new(repo: Arc<dyn ForecastRepository>) -> Self {
        Self { repo }
    }

    /// Starts an empty forecast the first time a card is observed. Seeing the
    /// same card again returns the stored forecast unchanged.
    pub fn execute(
        &self,
        year: SeasonYear,
        card_external_id: CardExternalId,
        mlb_id: Option<MlbId>,
        primary_position: Position,
        overall_rating: OverallRating,
    ) -> Result<PlayerCardForecast, DomainError> {
        if let Some(existing) = self.repo.get_by_card(year, card_external_id)? {
            debug!("Forecast for card {card_external_id} in {year} already exists");
            return Ok(existing);
        }

        let forecast = PlayerCardForecast::create(
            year,
            card_external_id,
            mlb_id,
            primary_position,
            overall_rating,
        );
        match self.repo.add(&forecast) {
            Ok(()) => {
                info!("Created forecast {} for card {card_external_id} in {year}", forecast.id);
                Ok(forecast)
            }
            // Lost a race with another creator
            Err(DomainError::DuplicateForecast { .. }) => self
                .repo
                .get_by_card(year, card_external_id)?
                .ok_or(DomainError::ForecastNotFound {
                    card_external_id: Some(card_external_id),
                    mlb_id,
                }),
            Err(e) => Err(e),
        }
    }
}
