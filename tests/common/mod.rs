//! Shared test helpers.
#![allow(dead_code)]

use cardforecast::domain::entities::forecast_impact::ForecastImpact;
use cardforecast::domain::entities::player_card_forecast::PlayerCardForecast;
use cardforecast::domain::values::identifiers::{CardExternalId, SeasonYear};
use cardforecast::domain::values::overall_rating::OverallRating;
use cardforecast::domain::values::position::Position;
use cardforecast::infrastructure::config::ForecastConfig;
use cardforecast::infrastructure::sqlite::forecast_repo::SqliteForecastRepo;
use cardforecast::infrastructure::sqlite::migrations::run_migrations;
use cardforecast::CardForecaster;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::Arc;

pub const EXAMPLE_CONFIG: &str = include_str!("../../cardforecast.example.json");

pub fn config() -> ForecastConfig {
    ForecastConfig::from_json_str(EXAMPLE_CONFIG).unwrap()
}

pub fn setup() -> CardForecaster {
    let _ = env_logger::try_init();
    CardForecaster::new(":memory:", config()).unwrap()
}

/// Facade plus a handle on the repository behind it.
pub fn setup_with_repo() -> (CardForecaster, Arc<SqliteForecastRepo>) {
    let _ = env_logger::try_init();
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    let repo = Arc::new(SqliteForecastRepo::new(conn));
    (CardForecaster::with_repository(repo.clone(), config()), repo)
}

pub fn year() -> SeasonYear {
    SeasonYear::new(2024).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_card(cf: &CardForecaster) -> PlayerCardForecast {
    cf.create_forecast(
        year(),
        CardExternalId::new(uuid::Uuid::new_v4()),
        None,
        Position::CenterField,
        OverallRating::new(82).unwrap(),
    )
    .unwrap()
}

pub fn boost(start: NaiveDate, end: NaiveDate) -> ForecastImpact {
    ForecastImpact::boost("Test boost", start, end).unwrap()
}
