use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS player_card_forecasts (
            id TEXT PRIMARY KEY,
            year INTEGER NOT NULL,
            card_external_id TEXT NOT NULL,
            mlb_id INTEGER,
            primary_position TEXT NOT NULL,
            overall_rating INTEGER NOT NULL,
            version INTEGER NOT NULL DEFAULT 0,
            UNIQUE (year, card_external_id)
        );

        -- Impact dates are stored as days from 0001-01-01 (day 1) so
        -- range comparisons hold for every representable year.
        CREATE TABLE IF NOT EXISTS forecast_impacts (
            forecast_id TEXT NOT NULL REFERENCES player_card_forecasts(id),
            seq INTEGER NOT NULL,
            kind TEXT NOT NULL,
            start_day INTEGER NOT NULL,
            end_day INTEGER NOT NULL,
            window_days INTEGER NOT NULL,
            demand INTEGER NOT NULL,
            details TEXT NOT NULL,
            PRIMARY KEY (forecast_id, seq)
        );

        CREATE INDEX IF NOT EXISTS idx_forecasts_mlb ON player_card_forecasts(year, mlb_id);
        CREATE INDEX IF NOT EXISTS idx_forecast_impacts_window ON forecast_impacts(start_day, end_day, forecast_id);
        CREATE INDEX IF NOT EXISTS idx_forecast_impacts_span ON forecast_impacts(window_days);
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
