//! Session lifecycle: lazy generation, atomic refresh, export, report stub.

use chrono::NaiveDate;
use dragondash_core::{
    client_registry::Verification,
    clock::DashClock,
    config::{DashConfig, MAX_DAYS},
    error::DashError,
    event::SessionEvent,
    export::read_clients_csv,
    filter::{ClientFilter, Selection},
    rng::DatasetSlot,
    session::{DashSession, REPORT_UNAVAILABLE},
};
use std::fs::File;

fn fixed_clock() -> DashClock {
    DashClock::Fixed(
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap(),
    )
}

fn session() -> DashSession {
    let _ = env_logger::builder().is_test(true).try_init();
    DashSession::new(DashConfig::default(), fixed_clock()).expect("default config is valid")
}

#[test]
fn first_access_generates_all_datasets() {
    let mut session = session();
    assert!(session.loaded().is_none());
    assert!(session.events().is_empty());

    let datasets = session.load().unwrap();
    assert_eq!(datasets.clients.len(), 20);
    assert_eq!(datasets.ledger.len(), 30);
    assert_eq!(datasets.payouts.len(), 15);

    assert_eq!(session.events().len(), 1);
    assert!(matches!(
        session.events()[0].event,
        SessionEvent::SessionInitialized { seed: 42, clients: 20, .. }
    ));

    // A second access reuses the same data.
    session.load().unwrap();
    assert_eq!(session.events().len(), 1);
}

#[test]
fn invalid_config_is_rejected_at_startup() {
    let config = DashConfig { ledger_days: 0, ..DashConfig::default() };
    let err = DashSession::new(config, fixed_clock()).err().expect("zero days rejected");
    assert!(matches!(err, DashError::InvalidConfig { field: "ledger_days", .. }));
}

#[test]
fn oversized_day_spans_are_rejected_at_startup() {
    let config = DashConfig { date_window_days: 1_000_000_000, ..DashConfig::default() };
    let err = DashSession::new(config, fixed_clock()).err().expect("huge window rejected");
    assert!(matches!(err, DashError::InvalidConfig { field: "date_window_days", .. }));

    let config = DashConfig { ledger_days: 200_000_000, ..DashConfig::default() };
    let err = DashSession::new(config, fixed_clock()).err().expect("huge ledger rejected");
    assert!(matches!(err, DashError::InvalidConfig { field: "ledger_days", .. }));

    let config = DashConfig { ledger_days: MAX_DAYS, date_window_days: MAX_DAYS as i64, ..DashConfig::default() };
    let mut session = DashSession::new(config, fixed_clock()).expect("largest spans accepted");
    let query = session.initial_query().unwrap();
    let view = session.view(&query).unwrap();
    assert_eq!(view.ledger.len(), MAX_DAYS);
}

#[test]
fn refreshing_payouts_replaces_only_payouts() {
    let mut session = session();
    let before = session.load().unwrap().clone();

    let rows = session.refresh_payouts().unwrap();
    assert_eq!(rows, 15);
    assert_eq!(session.epoch(DatasetSlot::Payouts), 1);
    assert_eq!(session.epoch(DatasetSlot::Clients), 0);

    let after = session.loaded().unwrap();
    assert_eq!(after.clients, before.clients);
    assert_eq!(after.ledger, before.ledger);
    assert_ne!(after.payouts, before.payouts);

    assert!(matches!(
        session.events().last().map(|e| &e.event),
        Some(SessionEvent::DatasetRefreshed { dataset: DatasetSlot::Payouts, epoch: 1, rows: 15, .. })
    ));
}

#[test]
fn refresh_all_replaces_every_dataset() {
    let mut session = session();
    let before = session.load().unwrap().clone();

    session.refresh_all().unwrap();
    let after = session.loaded().unwrap();
    assert_ne!(after.clients, before.clients);
    assert_ne!(after.ledger, before.ledger);
    assert_ne!(after.payouts, before.payouts);

    for slot in DatasetSlot::ALL {
        assert_eq!(session.epoch(slot), 1);
    }
    // init + one refresh event per dataset
    assert_eq!(session.events().len(), 4);
    let seqs: Vec<u64> = session.events().iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
}

#[test]
fn refresh_before_first_access_initializes_first() {
    let mut session = session();
    session.refresh_clients().unwrap();

    assert_eq!(session.epoch(DatasetSlot::Clients), 1);
    assert!(matches!(session.events()[0].event, SessionEvent::SessionInitialized { .. }));
    assert!(matches!(session.events()[1].event, SessionEvent::DatasetRefreshed { .. }));
}

#[test]
fn initial_query_shows_everyone_and_the_last_week() {
    let mut session = session();
    let query = session.initial_query().unwrap();
    let view = session.view(&query).unwrap();

    assert_eq!(view.clients.len(), 20);
    assert_eq!(view.client_summary.hidden_count, 0);
    assert_eq!(view.ledger.len(), 8);
    assert_eq!(view.ledger_summary.days_tracked, 8);
    assert_eq!(view.trend.daily_totals.len(), 8);
    assert_eq!(view.payouts.len(), 15);
    assert_eq!(view.payout_summary.total_count, 15);
}

#[test]
fn export_writes_filtered_clients_to_dated_file() {
    let mut session = session();
    let dir = tempfile::tempdir().unwrap();
    let filter = ClientFilter {
        verification: Selection::Only(Verification::Unverified),
        ..ClientFilter::default()
    };

    let path = session.export_clients(&filter, dir.path()).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("dragon_dash_clients_20261019.csv")
    );

    let exported = read_clients_csv(File::open(&path).unwrap()).unwrap();
    let expected = session
        .load()
        .unwrap()
        .clients
        .iter()
        .filter(|c| !c.verified)
        .count();
    assert_eq!(exported.len(), expected);
    assert!(exported.iter().all(|c| !c.verified));

    assert!(matches!(
        session.events().last().map(|e| &e.event),
        Some(SessionEvent::ClientsExported { rows, .. }) if *rows == expected
    ));
}

#[test]
fn report_request_is_only_acknowledged() {
    let mut session = session();
    let before = session.load().unwrap().clone();

    let ack = session.request_report();
    assert_eq!(ack.message, REPORT_UNAVAILABLE);
    assert_eq!(ack.requested_at, fixed_clock().now());

    assert_eq!(session.loaded(), Some(&before));
    assert!(matches!(
        session.events().last().map(|e| &e.event),
        Some(SessionEvent::ReportRequested { .. })
    ));
}

#[test]
fn partial_query_keeps_the_opening_selections() {
    let mut session = session();
    let opening = session.initial_query().unwrap();

    let query = opening
        .with_overrides(serde_json::json!({
            "clients": { "verification": "Verified", "search": "smith" }
        }))
        .unwrap();
    assert_eq!(query.clients.verification, Selection::Only(Verification::Verified));
    assert_eq!(query.clients.search, "smith");
    assert_eq!(query.clients.balance, opening.clients.balance);
    assert_eq!(query.ledger, opening.ledger);
    assert_eq!(query.ledger.date_range.len(), 2);
    assert_eq!(query.payouts, opening.payouts);

    let widened = opening
        .with_overrides(serde_json::json!({ "ledger": { "date_range": [] } }))
        .unwrap();
    assert!(widened.ledger.date_range.is_empty());
    assert_eq!(widened.clients, opening.clients);

    let err = opening
        .with_overrides(serde_json::json!({ "payouts": { "status": "Shipped" } }))
        .unwrap_err();
    assert!(matches!(err, DashError::Serialization(_)));
}
