use crate::domain::entities::forecast_impact::{ForecastImpact, ImpactKey};
use crate::domain::entities::player_card_forecast::PlayerCardForecast;
use crate::domain::error::DomainError;
use crate::domain::ports::forecast_repository::ForecastRepository;
use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct UpdateForecastImpactsCommand {
    pub year: SeasonYear,
    pub card_external_id: Option<CardExternalId>,
    pub mlb_id: Option<MlbId>,
    pub impacts: Vec<ForecastImpact>,
}

#[derive(Debug, Serialize)]
pub struct UpdateReport {
    pub forecast_id: String,
    pub applied: usize,
    pub skipped_duplicates: usize,
    pub version: u64,
}

/// Appends impacts to a forecast.
///
/// Applying the same batch twice is harmless: an impact whose
/// `(kind, start_date)` is already in the history, or earlier in the same
/// batch, is skipped. A concurrent writer makes the save fail with
/// `ConcurrencyConflict`; nothing here retries.
pub struct UpdateForecastImpactsUseCase {
    repo: Arc<dyn ForecastRepository>,
}

impl UpdateForecastImpactsUseCase {
    pub fn new(repo: Arc<dyn ForecastRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(&self, command: UpdateForecastImpactsCommand) -> Result<UpdateReport, DomainError> {
        let mut forecast = self.resolve(&command)?;
        let previous_mlb_id = forecast.mlb_id;

        if let (Some(card_id), Some(mlb_id)) = (command.card_external_id, command.mlb_id) {
            if forecast.mlb_id.is_none() {
                info!("Matched card {card_id} to MLB id {mlb_id}");
            }
            forecast.set_mlb_id(mlb_id)?;
        }

        let mut seen: HashSet<ImpactKey> = HashSet::new();
        let mut fresh = Vec::with_capacity(command.impacts.len());
        let mut skipped = 0;
        for impact in command.impacts {
            let key = impact.key();
            if forecast.has_impact(&key) || !seen.insert(key) {
                debug!("Skipping duplicate impact {key} for forecast {}", forecast.id);
                skipped += 1;
                continue;
            }
            fresh.push(impact);
        }

        let applied = fresh.len();
        let mlb_id_changed = forecast.mlb_id != previous_mlb_id;
        if applied == 0 && !mlb_id_changed {
            return Ok(UpdateReport {
                forecast_id: forecast.id,
                applied,
                skipped_duplicates: skipped,
                version: forecast.version,
            });
        }

        forecast.add_impacts(fresh);
        let version = self.repo.update(&forecast)?;
        info!(
            "Applied {applied} impact(s) to forecast {} (card {}, version {version})",
            forecast.id, forecast.card_external_id
        );

        Ok(UpdateReport {
            forecast_id: forecast.id,
            applied,
            skipped_duplicates: skipped,
            version,
        })
    }

    fn resolve(&self, command: &UpdateForecastImpactsCommand) -> Result<PlayerCardForecast, DomainError> {
        let found = match (command.card_external_id, command.mlb_id) {
            (None, None) => return Err(DomainError::MissingIdentifier),
            (Some(card_id), _) => self.repo.get_by_card(command.year, card_id)?,
            (None, Some(mlb_id)) => self.repo.get_by_mlb_id(command.year, mlb_id)?,
        };
        found.ok_or(DomainError::ForecastNotFound {
            card_external_id: command.card_external_id,
            mlb_id: command.mlb_id,
        })
    }
}
