use crate::domain::entities::forecast_impact::{ForecastImpact, ImpactKind};
use crate::domain::entities::player_card_forecast::PlayerCardForecast;
use crate::domain::error::DomainError;
use crate::domain::ports::forecast_repository::ForecastRepository;
use crate::domain::values::demand::Demand;
use crate::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use crate::domain::values::overall_rating::OverallRating;
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Transaction};
use std::collections::HashMap;
use std::sync::Mutex;

const FORECAST_COLUMNS: &str =
    "id, year, card_external_id, mlb_id, primary_position, overall_rating, version";

const IMPACT_COLUMNS: &str = "forecast_id, start_day, end_day, demand, details";

/// Forecast ids with an impact covering day ?2, given that no window is
/// longer than ?2 - ?1 days. Both bounds sit on `idx_forecast_impacts_window`.
const IMPACTED_IDS: &str = "SELECT forecast_id FROM forecast_impacts
     WHERE start_day BETWEEN ?1 AND ?2 AND end_day >= ?2";

pub struct SqliteForecastRepo {
    conn: Mutex<Connection>,
}

struct ForecastRow {
    id: String,
    year: u16,
    card_external_id: String,
    mlb_id: Option<u32>,
    primary_position: String,
    overall_rating: u8,
    version: i64,
}

struct ImpactRow {
    forecast_id: String,
    start_day: i32,
    end_day: i32,
    demand: i64,
    details: String,
}

impl SqliteForecastRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_forecast(row: &rusqlite::Row) -> Result<ForecastRow, rusqlite::Error> {
        Ok(ForecastRow {
            id: row.get(0)?,
            year: row.get(1)?,
            card_external_id: row.get(2)?,
            mlb_id: row.get(3)?,
            primary_position: row.get(4)?,
            overall_rating: row.get(5)?,
            version: row.get(6)?,
        })
    }

    fn row_to_impact(row: &rusqlite::Row) -> Result<ImpactRow, rusqlite::Error> {
        Ok(ImpactRow {
            forecast_id: row.get(0)?,
            start_day: row.get(1)?,
            end_day: row.get(2)?,
            demand: row.get(3)?,
            details: row.get(4)?,
        })
    }

    fn hydrate(row: ForecastRow, impacts: Vec<ForecastImpact>) -> Result<PlayerCardForecast, DomainError> {
        let corrupt = |what: String| DomainError::Database(format!("Corrupt forecast {}: {what}", row.id));
        Ok(PlayerCardForecast {
            year: SeasonYear::new(row.year)?,
            card_external_id: row.card_external_id.parse()?,
            mlb_id: row.mlb_id.map(MlbId::new).transpose()?,
            primary_position: row.primary_position.parse().map_err(corrupt)?,
            overall_rating: OverallRating::new(row.overall_rating)?,
            impacts,
            version: u64::try_from(row.version).map_err(|e| corrupt(e.to_string()))?,
            id: row.id,
        })
    }

    fn impact_from_row(row: ImpactRow) -> Result<ForecastImpact, DomainError> {
        let kind: ImpactKind = serde_json::from_str(&row.details)
            .map_err(|e| DomainError::Database(format!("Bad impact details for {}: {e}", row.forecast_id)))?;
        let demand = Demand::from_ordinal(row.demand)
            .ok_or_else(|| DomainError::Database(format!("Bad demand ordinal {}", row.demand)))?;
        ForecastImpact::from_parts(kind, day_to_date(row.start_day)?, day_to_date(row.end_day)?, demand)
    }

    fn load_impacts(conn: &Connection, forecast_id: &str) -> Result<Vec<ForecastImpact>, DomainError> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {IMPACT_COLUMNS} FROM forecast_impacts WHERE forecast_id = ?1 ORDER BY seq"
        ))?;
        let rows = stmt
            .query_map(params![forecast_id], Self::row_to_impact)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::impact_from_row).collect()
    }

    fn find_one(
        &self,
        where_clause: &str,
        params: &[&dyn rusqlite::types::ToSql],
    ) -> Result<Option<PlayerCardForecast>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let row = conn
            .query_row(
                &format!("SELECT {FORECAST_COLUMNS} FROM player_card_forecasts WHERE {where_clause} ORDER BY rowid LIMIT 1"),
                params,
                Self::row_to_forecast,
            )
            .optional()?;
        match row {
            Some(row) => {
                let impacts = Self::load_impacts(&conn, &row.id)?;
                Ok(Some(Self::hydrate(row, impacts)?))
            }
            None => Ok(None),
        }
    }

    /// Writes impacts past those already stored. Existing rows are never
    /// rewritten.
    fn append_impacts(tx: &Transaction, forecast: &PlayerCardForecast) -> Result<usize, DomainError> {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO forecast_impacts (forecast_id, seq, kind, start_day, end_day, window_days, demand, details)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        let mut written = 0;
        for (seq, impact) in forecast.impacts.iter().enumerate() {
            let details = serde_json::to_string(&impact.kind)
                .map_err(|e| DomainError::Database(format!("Failed to encode impact: {e}")))?;
            written += stmt.execute(params![
                forecast.id,
                seq as i64,
                impact.kind.discriminator(),
                impact.start_date.num_days_from_ce(),
                impact.end_date.num_days_from_ce(),
                impact.window_days(),
                impact.demand.ordinal(),
                details,
            ])?;
        }
        Ok(written)
    }
}

fn day_to_date(day: i32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_num_days_from_ce_opt(day)
        .ok_or_else(|| DomainError::Database(format!("Bad day number {day}")))
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation)
}

impl ForecastRepository for SqliteForecastRepo {
    fn add(&self, forecast: &PlayerCardForecast) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO player_card_forecasts (id, year, card_external_id, mlb_id, primary_position, overall_rating, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                forecast.id,
                forecast.year.value(),
                forecast.card_external_id.to_string(),
                forecast.mlb_id.map(|m| m.value()),
                forecast.primary_position.to_string(),
                forecast.overall_rating.value(),
                forecast.version as i64,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::DuplicateForecast {
                    year: forecast.year,
                    card_external_id: forecast.card_external_id,
                }
            } else {
                DomainError::Database(format!("Failed to add forecast: {e}"))
            }
        })?;
        Self::append_impacts(&tx, forecast)?;
        tx.commit()?;
        Ok(())
    }

    fn update(&self, forecast: &PlayerCardForecast) -> Result<u64, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn.transaction()?;
        let rows = tx.execute(
            "UPDATE player_card_forecasts
             SET mlb_id = ?1, primary_position = ?2, overall_rating = ?3, version = version + 1
             WHERE id = ?4 AND version = ?5",
            params![
                forecast.mlb_id.map(|m| m.value()),
                forecast.primary_position.to_string(),
                forecast.overall_rating.value(),
                forecast.id,
                forecast.version as i64,
            ],
        )?;
        if rows == 0 {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM player_card_forecasts WHERE id = ?1)",
                params![forecast.id],
                |r| r.get(0),
            )?;
            if !exists {
                return Err(DomainError::ForecastNotFound {
                    card_external_id: Some(forecast.card_external_id),
                    mlb_id: forecast.mlb_id,
                });
            }
            warn!(
                "Rejected stale write to forecast {} at version {}",
                forecast.id, forecast.version
            );
            return Err(DomainError::ConcurrencyConflict {
                year: forecast.year,
                card_external_id: forecast.card_external_id,
            });
        }
        let written = Self::append_impacts(&tx, forecast)?;
        tx.commit()?;
        debug!("Forecast {} saved with {written} new impact row(s)", forecast.id);
        Ok(forecast.version + 1)
    }

    fn get_by_card(
        &self,
        year: SeasonYear,
        card_external_id: CardExternalId,
    ) -> Result<Option<PlayerCardForecast>, DomainError> {
        self.find_one(
            "year = ?1 AND card_external_id = ?2",
            params![year.value(), card_external_id.to_string()],
        )
    }

    fn get_by_mlb_id(
        &self,
        year: SeasonYear,
        mlb_id: MlbId,
    ) -> Result<Option<PlayerCardForecast>, DomainError> {
        self.find_one("year = ?1 AND mlb_id = ?2", params![year.value(), mlb_id.value()])
    }

    fn get_impacted_forecasts(&self, date: NaiveDate) -> Result<Vec<PlayerCardForecast>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let max_window: Option<i64> =
            conn.query_row("SELECT MAX(window_days) FROM forecast_impacts", [], |r| r.get(0))?;
        let Some(max_window) = max_window else {
            return Ok(Vec::new());
        };
        let on = i64::from(date.num_days_from_ce());
        let earliest_start = on.saturating_sub(max_window.max(0));
        let bounds = params![earliest_start, on];

        let mut stmt = conn.prepare(&format!(
            "SELECT {FORECAST_COLUMNS} FROM player_card_forecasts
             WHERE id IN ({IMPACTED_IDS}) ORDER BY year, card_external_id"
        ))?;
        let rows = stmt
            .query_map(bounds, Self::row_to_forecast)?
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT {IMPACT_COLUMNS} FROM forecast_impacts
             WHERE forecast_id IN ({IMPACTED_IDS}) ORDER BY forecast_id, seq"
        ))?;
        let mut by_forecast: HashMap<String, Vec<ForecastImpact>> = HashMap::new();
        for row in stmt.query_map(bounds, Self::row_to_impact)? {
            let row = row?;
            let forecast_id = row.forecast_id.clone();
            by_forecast
                .entry(forecast_id)
                .or_default()
                .push(Self::impact_from_row(row)?);
        }

        debug!("{} forecast(s) impacted on {date}", rows.len());
        rows.into_iter()
            .map(|row| {
                let impacts = by_forecast.remove(&row.id).unwrap_or_default();
                Self::hydrate(row, impacts)
            })
            .collect()
    }
}
