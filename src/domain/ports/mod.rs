pub mod forecast_repository;
