//! Metrics are computed over the filtered view, never the full dataset.

use chrono::NaiveDate;
use dragondash_core::{
    channel::Channel,
    client_registry::{generate_clients, Verification},
    daily_ledger::generate_ledger,
    filter::{ClientFilter, LedgerFilter, PayoutFilter, RowFilter, Selection},
    metrics::{channel_breakdown, ClientSummary, LedgerSummary, PayoutSummary, TrendSeries},
    payout_journal::{generate_payouts, ConfirmationStatus},
    rng::{DatasetSlot, RngBank},
};

const TOLERANCE: f64 = 0.01;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn client_summary_uses_only_the_filtered_view() {
    let mut rng = RngBank::new(42).for_dataset(DatasetSlot::Clients, 0);
    let clients = generate_clients(60, today(), &mut rng).unwrap();

    let filter = ClientFilter {
        verification: Selection::Only(Verification::Verified),
        ..ClientFilter::default()
    };
    let view = filter.apply(&clients);
    let summary = ClientSummary::from_view(&view, clients.len());

    let expected_sent: f64 = view.iter().map(|c| c.total_sent).sum();
    let expected_balance: f64 = view.iter().map(|c| c.current_balance).sum();

    assert_eq!(summary.client_count, view.len());
    assert_eq!(summary.hidden_count, clients.len() - view.len());
    assert!((summary.total_sent - expected_sent).abs() < TOLERANCE);
    assert!((summary.total_balance - expected_balance).abs() < TOLERANCE);
    assert_eq!(summary.verified_count, view.len());
    assert_eq!(summary.verification_rate, Some(100.0));

    let average = summary.average_sent.expect("non-empty view has an average");
    assert!((average - expected_sent / view.len() as f64).abs() < TOLERANCE);
}

#[test]
fn empty_views_report_not_applicable() {
    let clients = ClientSummary::from_view(&[], 20);
    assert_eq!(clients.client_count, 0);
    assert_eq!(clients.hidden_count, 20);
    assert_eq!(clients.total_sent, 0.0);
    assert_eq!(clients.average_sent, None);
    assert_eq!(clients.average_balance, None);
    assert_eq!(clients.verification_rate, None);

    let ledger = LedgerSummary::from_view(&[]);
    assert_eq!(ledger.days_tracked, 0);
    assert_eq!(ledger.average_daily, None);
    assert_eq!(ledger.period_total, 0.0);

    let breakdown = channel_breakdown(&ledger.channel_totals);
    assert_eq!(breakdown.len(), 4);
    assert!(breakdown.iter().all(|slice| slice.share.is_none()));

    let payouts = PayoutSummary::from_view(&[]);
    assert_eq!(payouts.total_count, 0);
    assert_eq!(payouts.completed_amount, 0.0);
}

#[test]
fn ledger_summary_and_series_follow_the_date_window() {
    let mut rng = RngBank::new(42).for_dataset(DatasetSlot::Ledger, 0);
    let ledger = generate_ledger(30, today(), &mut rng).unwrap();
    let start = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();

    let view = LedgerFilter::between(start, today()).view(&ledger);
    let summary = LedgerSummary::from_view(&view);

    assert_eq!(summary.days_tracked, 5);
    let expected_total: f64 = view.iter().map(|e| e.daily_total).sum();
    assert!((summary.period_total - expected_total).abs() < TOLERANCE);
    assert!((summary.average_daily.unwrap() - expected_total / 5.0).abs() < TOLERANCE);

    let channel_sum: f64 = Channel::ALL.iter().map(|c| summary.channel_totals.get(*c)).sum();
    assert!((channel_sum - summary.period_total).abs() < TOLERANCE);

    let breakdown = channel_breakdown(&summary.channel_totals);
    let shares: f64 = breakdown.iter().filter_map(|slice| slice.share).sum();
    assert!((shares - 1.0).abs() < 1e-9);
    assert_eq!(
        breakdown.iter().map(|slice| slice.channel).collect::<Vec<_>>(),
        Channel::ALL.to_vec()
    );

    let trend = TrendSeries::from_view(&view);
    assert_eq!(trend.daily_totals.len(), 5);
    assert_eq!(trend.cumulative_totals.len(), 5);
    assert_eq!(trend.daily_totals[0].date, start);
    // Cumulative values keep their whole-run meaning inside a window.
    assert_eq!(trend.cumulative_totals[4].value, ledger[29].cumulative_total);
}

#[test]
fn payout_summary_tallies_statuses_in_view() {
    let now = today().and_hms_opt(8, 0, 0).unwrap();
    let mut rng = RngBank::new(3).for_dataset(DatasetSlot::Payouts, 0);
    let payouts = generate_payouts(40, 20, now, &mut rng).unwrap();

    let everything = PayoutFilter::default().apply(&payouts);
    let summary = PayoutSummary::from_view(&everything);
    assert_eq!(summary.total_count, 40);
    assert_eq!(
        summary.completed_count + summary.processing_count + summary.failed_count,
        40
    );

    let expected_amount: f64 = payouts
        .iter()
        .filter(|p| p.status == ConfirmationStatus::Completed)
        .map(|p| p.amount)
        .sum();
    assert!((summary.completed_amount - expected_amount).abs() < TOLERANCE);

    let failed_only = PayoutFilter { status: Selection::Only(ConfirmationStatus::Failed) };
    let failed_view = failed_only.apply(&payouts);
    let failed = PayoutSummary::from_view(&failed_view);
    assert_eq!(failed.total_count, summary.failed_count);
    assert_eq!(failed.completed_count, 0);
    assert_eq!(failed.completed_amount, 0.0);
}
