use cardforecast::application::impact_factory::ForecastImpactEvent;
use cardforecast::application::query::ForecastLookup;
use cardforecast::cli::commands::{Cli, Commands};
use cardforecast::domain::values::identifiers::{CardExternalId, MlbId, SeasonYear};
use cardforecast::domain::values::overall_rating::OverallRating;
use cardforecast::domain::values::position::Position;
use cardforecast::domain::values::stat_criteria::StatGroup;
use cardforecast::infrastructure::config::{db_path_from_env, ForecastConfig};
use cardforecast::CardForecaster;
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;
use std::collections::HashMap;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let forecaster = match ForecastConfig::from_env()
        .and_then(|config| CardForecaster::new(&db_path_from_env(), config))
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error initializing cardforecast: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(forecaster, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(cf: CardForecaster, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Create {
            year,
            card,
            position,
            rating,
            mlb_id,
        } => {
            let position: Position = position.parse().map_err(|e: String| e)?;
            let forecast = cf.create_forecast(
                SeasonYear::new(year)?,
                card.parse()?,
                mlb_id.map(MlbId::new).transpose()?,
                position,
                OverallRating::new(rating)?,
            )?;
            println!("{}", serde_json::to_string_pretty(&forecast)?);
        }
        Commands::Apply {
            year,
            events,
            card,
            mlb_id,
        } => {
            let value: serde_json::Value = serde_json::from_str(&events)?;
            let events: Vec<ForecastImpactEvent> = if value.is_array() {
                serde_json::from_value(value)?
            } else {
                vec![serde_json::from_value(value)?]
            };
            let report = cf.apply_events(
                SeasonYear::new(year)?,
                card.map(|c| c.parse::<CardExternalId>()).transpose()?,
                mlb_id.map(MlbId::new).transpose()?,
                &events,
            )?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Show {
            year,
            card,
            mlb_id,
            on,
        } => {
            let lookup = match (card, mlb_id) {
                (Some(card), _) => ForecastLookup::Card(card.parse()?),
                (None, Some(id)) => ForecastLookup::Mlb(MlbId::new(id)?),
                (None, None) => return Err("Either --card or --mlb-id is required".into()),
            };
            let forecast = cf
                .get_forecast(SeasonYear::new(year)?, lookup)?
                .ok_or("Forecast not found")?;
            match on {
                Some(on) => {
                    let date = parse_date(&on)?;
                    let active = forecast.active_impacts_on(date);
                    println!("{}", serde_json::to_string_pretty(&active)?);
                }
                None => println!("{}", serde_json::to_string_pretty(&forecast)?),
            }
        }
        Commands::Impacted { date } => {
            let date = parse_date(&date)?;
            let forecasts = cf.get_impacted_forecasts(date)?;
            for f in &forecasts {
                let demands: Vec<String> = f
                    .active_impacts_on(date)
                    .iter()
                    .map(|i| format!("{}={}", i.kind, i.demand))
                    .collect();
                println!("{} {} {}", f.year, f.card_external_id, demands.join(","));
            }
        }
        Commands::Score { group, stats } => {
            let group: StatGroup = group.parse().map_err(|e: String| e)?;
            let values: HashMap<String, Decimal> = serde_json::from_str(&stats)?;
            let score = cf.score(group, &values)?;
            println!("{score}");
        }
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format: {s}. Use YYYY-MM-DD"))
}
