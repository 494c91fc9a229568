//! The dashboard view: every filtered dataset plus the numbers and
//! series a presentation layer needs to render it.

use crate::{
    client_registry::Client,
    config::MAX_DAYS,
    daily_ledger::LedgerEntry,
    error::DashResult,
    filter::{BalanceRange, ClientFilter, LedgerFilter, PayoutFilter, RowFilter},
    metrics::{channel_breakdown, ChannelShare, ClientSummary, LedgerSummary, PayoutSummary, TrendSeries},
    payout_journal::PayoutConfirmation,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three datasets a session owns.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Datasets {
    pub clients: Vec<Client>,
    pub ledger: Vec<LedgerEntry>,
    pub payouts: Vec<PayoutConfirmation>,
}

/// Every user-controlled selection on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardQuery {
    pub clients: ClientFilter,
    pub ledger: LedgerFilter,
    pub payouts: PayoutFilter,
}

impl DashboardQuery {
    /// The selections a fresh dashboard starts with: everything "All",
    /// the full balance range, and the last `window_days` of the ledger.
    /// The window is clamped to `[0, MAX_DAYS]`.
    pub fn initial(datasets: &Datasets, today: NaiveDate, window_days: i64) -> Self {
        let window = window_days.clamp(0, MAX_DAYS as i64);
        let start = today
            .checked_sub_signed(Duration::days(window))
            .unwrap_or(NaiveDate::MIN);
        Self {
            clients: ClientFilter {
                balance: Some(BalanceRange::covering(&datasets.clients)),
                ..ClientFilter::default()
            },
            ledger: LedgerFilter::between(start, today),
            payouts: PayoutFilter::default(),
        }
    }

    /// Overlay a partial query onto `self`. Objects merge field by field;
    /// any other value (including arrays) replaces what it lands on.
    pub fn with_overrides(&self, overrides: Value) -> DashResult<Self> {
        let mut merged = serde_json::to_value(self)?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }
}

fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub clients: Vec<&'a Client>,
    pub client_summary: ClientSummary,
    pub ledger: Vec<&'a LedgerEntry>,
    pub ledger_summary: LedgerSummary,
    pub trend: TrendSeries,
    pub channel_breakdown: Vec<ChannelShare>,
    pub payouts: Vec<&'a PayoutConfirmation>,
    pub payout_summary: PayoutSummary,
}

impl<'a> DashboardView<'a> {
    /// One recomputation pass over the held datasets.
    pub fn build(datasets: &'a Datasets, query: &DashboardQuery) -> Self {
        let clients = query.clients.apply(&datasets.clients);
        let ledger = query.ledger.view(&datasets.ledger);
        let payouts = query.payouts.apply(&datasets.payouts);

        let client_summary = ClientSummary::from_view(&clients, datasets.clients.len());
        let ledger_summary = LedgerSummary::from_view(&ledger);
        let trend = TrendSeries::from_view(&ledger);
        let breakdown = channel_breakdown(&ledger_summary.channel_totals);
        let payout_summary = PayoutSummary::from_view(&payouts);

        Self {
            clients,
            client_summary,
            ledger,
            ledger_summary,
            trend,
            channel_breakdown: breakdown,
            payouts,
            payout_summary,
        }
    }
}
