pub mod forecast_repo;
pub mod migrations;
