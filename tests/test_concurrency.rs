mod common;

use cardforecast::application::query::ForecastLookup;
use cardforecast::domain::error::DomainError;
use cardforecast::domain::ports::forecast_repository::ForecastRepository;
use common::{boost, date, new_card, setup, setup_with_repo, year};
use std::sync::Arc;
use std::thread;

#[test]
fn test_stale_write_is_rejected() {
    let (cf, repo) = setup_with_repo();
    let card = new_card(&cf);

    let mut first = repo.get_by_card(year(), card.card_external_id).unwrap().unwrap();
    let mut second = first.clone();

    first.add_impacts(vec![boost(date(2024, 6, 1), date(2024, 6, 2))]);
    repo.update(&first).unwrap();

    second.add_impacts(vec![boost(date(2024, 7, 1), date(2024, 7, 2))]);
    let err = repo.update(&second).unwrap_err();
    assert!(matches!(err, DomainError::ConcurrencyConflict { .. }));

    let stored = repo.get_by_card(year(), card.card_external_id).unwrap().unwrap();
    assert_eq!(stored.impacts.len(), 1);
    assert_eq!(stored.impacts[0].start_date, date(2024, 6, 1));
}

#[test]
fn test_concurrent_events_on_same_card_are_not_lost() {
    let cf = Arc::new(setup());
    let card = new_card(&cf);

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let cf = cf.clone();
            let card_id = card.card_external_id;
            thread::spawn(move || {
                let start = date(2024, 6, 1 + i);
                // The core never retries; callers reload and re-issue
                loop {
                    match cf.update_forecast_impacts(year(), Some(card_id), None, vec![boost(start, start)]) {
                        Ok(report) => return report,
                        Err(DomainError::ConcurrencyConflict { .. }) => continue,
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let stored = cf
        .get_forecast(year(), ForecastLookup::Card(card.card_external_id))
        .unwrap()
        .unwrap();
    assert_eq!(stored.impacts.len(), 8);
    assert_eq!(stored.version, 8);
}
