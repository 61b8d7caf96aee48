use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(
        "Stat criteria weights must each sum to 1 (batting: {batting}, pitching: {pitching}, fielding: {fielding})"
    )]
    InvalidMinMaxNormalizationCriteria {
        batting: Decimal,
        pitching: Decimal,
        fielding: Decimal,
    },

    #[error("Invalid stat criteria: {0}")]
    InvalidMinMaxStatCriteria(String),

    #[error("Unexpected stat for scoring: {0}")]
    UnexpectedMinMaxStatType(String),

    #[error("Missing value for stat: {0}")]
    MissingStatValue(String),

    #[error("Performance score must be between 0 and 1, got {0}")]
    PerformanceScoreOutOfRange(Decimal),

    #[error("Impact window starts {start} but ends {end}")]
    InvalidImpactWindow { start: NaiveDate, end: NaiveDate },

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Either a card external ID or an MLB ID must be specified")]
    MissingIdentifier,

    #[error("No forecast found (card: {}, mlb id: {})", display_opt(.card_external_id), display_opt(.mlb_id))]
    ForecastNotFound {
        card_external_id: Option<CardExternalId>,
        mlb_id: Option<MlbId>,
    },

    #[error("Forecast already exists for {card_external_id} in {year}")]
    DuplicateForecast {
        year: SeasonYear,
        card_external_id: CardExternalId,
    },

    #[error("Forecast for {card_external_id} in {year} was modified concurrently")]
    ConcurrencyConflict {
        year: SeasonYear,
        card_external_id: CardExternalId,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}
