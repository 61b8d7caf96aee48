use crate::domain::error::DomainError;
use crate::domain::values::impact_duration::ForecastImpactDuration;
use crate::domain::values::position_scarcity::PositionScarcity;
use crate::domain::values::stat_criteria::MinMaxNormalizationCriteria;
use crate::domain::values::thresholds::StatsChangeThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "CARDFORECAST_CONFIG";
pub const DB_PATH_ENV: &str = "CARDFORECAST_DB";
pub const DEFAULT_CONFIG_PATH: &str = "./cardforecast.json";
pub const DEFAULT_DB_PATH: &str = "./cardforecast.db";

/// Everything the forecasting core needs from outside. Validated as a whole
/// when loaded, so a bad file stops startup instead of failing one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub criteria: MinMaxNormalizationCriteria,
    pub durations: ForecastImpactDuration,
    pub thresholds: StatsChangeThresholds,
    #[serde(default)]
    pub position_scarcity: PositionScarcity,
}

impl ForecastConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let config: ForecastConfig =
            serde_json::from_str(json).map_err(|e| DomainError::Config(e.to_string()))?;
        config.durations.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Config(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Loads from `CARDFORECAST_CONFIG`, falling back to `./cardforecast.json`.
    pub fn from_env() -> Result<Self, DomainError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::from_file(path)
    }
}

pub fn db_path_from_env() -> String {
    std::env::var(DB_PATH_ENV).unwrap_or_else(|_| DEFAULT_DB_PATH.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../../cardforecast.example.json");

    #[test]
    fn test_example_config_loads() {
        let config = ForecastConfig::from_json_str(EXAMPLE).unwrap();
        assert_eq!(config.durations.player_free_agency, 5);
        assert!(!config.criteria.for_group(crate::domain::values::stat_criteria::StatGroup::Pitching).is_empty());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let json = EXAMPLE.replace("\"player_free_agency\": 5", "\"player_free_agency\": -5");
        assert!(matches!(
            ForecastConfig::from_json_str(&json),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            ForecastConfig::from_json_str("{"),
            Err(DomainError::Config(_))
        ));
    }
}
