pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::create_forecast::CreateForecastUseCase;
use crate::application::impact_factory::{ForecastImpactEvent, ImpactFactory};
use crate::application::query::{ForecastLookup, ForecastQueryUseCase};
use crate::application::update_forecast_impacts::{
    UpdateForecastImpactsCommand, UpdateForecastImpactsUseCase, UpdateReport,
};
use crate::domain::entities::forecast_impact::ForecastImpact;
use crate::domain::entities::player_card_forecast::PlayerCardForecast;
use crate::domain::error::DomainError;
use crate::domain::ports::forecast_repository::ForecastRepository;
use crate::domain::services::performance_comparator::{
    PerformanceComparator, PerformanceScoreComparison,
};
use crate::domain::services::stat_normalizer::StatNormalizer;
use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use crate::domain::values::overall_rating::OverallRating;
use crate::domain::values::performance_score::PerformanceScore;
use crate::domain::values::position::Position;
use crate::domain::values::stat_criteria::StatGroup;
use crate::infrastructure::config::ForecastConfig;
use crate::infrastructure::sqlite::forecast_repo::SqliteForecastRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::Connection;
use std::collections::HashMap;
use std::sync::Arc;

pub struct CardForecaster {
    create_uc: CreateForecastUseCase,
    update_uc: UpdateForecastImpactsUseCase,
    query_uc: ForecastQueryUseCase,
    factory: ImpactFactory,
}

impl CardForecaster {
    pub fn new(db_path: &str, config: ForecastConfig) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let repo: Arc<dyn ForecastRepository> = Arc::new(SqliteForecastRepo::new(conn));
        Ok(Self::with_repository(repo, config))
    }

    pub fn with_repository(repo: Arc<dyn ForecastRepository>, config: ForecastConfig) -> Self {
        let factory = ImpactFactory::new(
            config.durations,
            config.thresholds,
            config.position_scarcity,
            StatNormalizer::new(config.criteria),
        );
        Self {
            create_uc: CreateForecastUseCase::new(repo.clone()),
            update_uc: UpdateForecastImpactsUseCase::new(repo.clone()),
            query_uc: ForecastQueryUseCase::new(repo),
            factory,
        }
    }

    pub fn create_forecast(
        &self,
        year: SeasonYear,
        card_external_id: CardExternalId,
        mlb_id: Option<MlbId>,
        primary_position: Position,
        overall_rating: OverallRating,
    ) -> Result<PlayerCardForecast, DomainError> {
        self.create_uc
            .execute(year, card_external_id, mlb_id, primary_position, overall_rating)
    }

    pub fn update_forecast_impacts(
        &self,
        year: SeasonYear,
        card_external_id: Option<CardExternalId>,
        mlb_id: Option<MlbId>,
        impacts: Vec<ForecastImpact>,
    ) -> Result<UpdateReport, DomainError> {
        self.update_uc.execute(UpdateForecastImpactsCommand {
            year,
            card_external_id,
            mlb_id,
            impacts,
        })
    }

    /// Translates events into impacts and applies them in one update.
    pub fn apply_events(
        &self,
        year: SeasonYear,
        card_external_id: Option<CardExternalId>,
        mlb_id: Option<MlbId>,
        events: &[ForecastImpactEvent],
    ) -> Result<UpdateReport, DomainError> {
        let impacts = self.factory.create_impacts(events)?;
        self.update_forecast_impacts(year, card_external_id, mlb_id, impacts)
    }

    pub fn get_forecast(
        &self,
        year: SeasonYear,
        lookup: ForecastLookup,
    ) -> Result<Option<PlayerCardForecast>, DomainError> {
        self.query_uc.get_forecast(year, lookup)
    }

    pub fn get_impacted_forecasts(&self, date: NaiveDate) -> Result<Vec<PlayerCardForecast>, DomainError> {
        self.query_uc.get_impacted_forecasts(date)
    }

    pub fn create_impact(&self, event: &ForecastImpactEvent) -> Result<ForecastImpact, DomainError> {
        self.factory.create_impact(event)
    }

    pub fn score(
        &self,
        group: StatGroup,
        values: &HashMap<String, Decimal>,
    ) -> Result<PerformanceScore, DomainError> {
        self.factory.normalizer().score(group, values)
    }

    pub fn compare(
        &self,
        old_score: PerformanceScore,
        new_score: PerformanceScore,
        threshold: Decimal,
    ) -> PerformanceScoreComparison {
        PerformanceComparator::compare(old_score, new_score, threshold)
    }
}
