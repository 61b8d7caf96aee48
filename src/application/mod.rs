pub mod create_forecast;
pub mod impact_factory;
pub mod query;
pub mod update_forecast_impacts;
