pub mod forecast_impact;
pub mod player_card_forecast;
