use crate::domain::entities::player_card_forecast::PlayerCardForecast;
use crate::domain::error::DomainError;
use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use chrono::NaiveDate;

/// Persistence boundary for forecast aggregates.
///
/// `update` is optimistic: it must only succeed when the stored version equals
/// `forecast.version`, and it bumps the version on success. A stale write fails
/// with [`DomainError::ConcurrencyConflict`] and leaves storage untouched.
pub trait ForecastRepository: Send + Sync {
    fn add(&self, forecast: &PlayerCardForecast) -> Result<(), DomainError>;
    fn update(&self, forecast: &PlayerCardForecast) -> Result<u64, DomainError>;
    fn get_by_card(
        &self,
        year: SeasonYear,
        card_external_id: CardExternalId,
    ) -> Result<Option<PlayerCardForecast>, DomainError>;
    fn get_by_mlb_id(
        &self,
        year: SeasonYear,
        mlb_id: MlbId,
    ) -> Result<Option<PlayerCardForecast>, DomainError>;
    /// Every forecast with at least one impact whose window contains `date`.
    fn get_impacted_forecasts(&self, date: NaiveDate)
        -> Result<Vec<PlayerCardForecast>, DomainError>;
}
