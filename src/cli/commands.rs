use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cardforecast", about = "MLB card demand forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an empty forecast for a newly observed card
    Create {
        /// Season year
        year: u16,
        /// Marketplace card UUID
        card: String,
        /// Position code (C, SS, SP, ...)
        position: String,
        /// Overall rating (40-99)
        rating: u8,
        #[arg(long)]
        mlb_id: Option<u32>,
    },
    /// Apply impact events to a forecast
    Apply {
        year: u16,
        /// JSON event object or array of events, e.g. {"event":"player_free_agency","date":"2024-10-28"}
        events: String,
        #[arg(long, required_unless_present = "mlb_id")]
        card: Option<String>,
        #[arg(long)]
        mlb_id: Option<u32>,
    },
    /// Show one forecast with its impacts
    Show {
        year: u16,
        #[arg(long, conflicts_with = "mlb_id", required_unless_present = "mlb_id")]
        card: Option<String>,
        #[arg(long)]
        mlb_id: Option<u32>,
        /// Only list impacts active on this date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
    },
    /// List forecasts with an impact active on a date
    Impacted {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Score a raw stat line
    Score {
        /// Stat group (batting, pitching, fielding)
        group: String,
        /// JSON object of stat key to value
        stats: String,
    },
}
