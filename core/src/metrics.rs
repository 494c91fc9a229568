//! Summary metrics and chart series, computed over filtered views only.
//!
//! Averages and rates over an empty view are `None` ("not applicable"),
//! never a division by zero.

use crate::{
    channel::{Channel, ChannelAmounts},
    client_registry::Client,
    daily_ledger::LedgerEntry,
    payout_journal::{ConfirmationStatus, PayoutConfirmation},
    types::{round_cents, Money},
};
use chrono::NaiveDate;
use serde::Serialize;

fn mean(total: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| total / count as f64)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientSummary {
    pub client_count: usize,
    /// Clients in the registry that the current filters hide.
    pub hidden_count: usize,
    pub total_sent: Money,
    pub average_sent: Option<Money>,
    pub total_balance: Money,
    pub average_balance: Option<Money>,
    pub verified_count: usize,
    /// Percentage in [0, 100].
    pub verification_rate: Option<f64>,
}

impl ClientSummary {
    /// `registry_size` is the unfiltered client count.
    pub fn from_view(view: &[&Client], registry_size: usize) -> Self {
        let client_count = view.len();
        let total_sent = round_cents(view.iter().map(|c| c.total_sent).sum());
        let total_balance = round_cents(view.iter().map(|c| c.current_balance).sum());
        let verified_count = view.iter().filter(|c| c.verified).count();

        Self {
            client_count,
            hidden_count: registry_size.saturating_sub(client_count),
            total_sent,
            average_sent: mean(total_sent, client_count),
            total_balance,
            average_balance: mean(total_balance, client_count),
            verified_count,
            verification_rate: mean(verified_count as f64 * 100.0, client_count),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LedgerSummary {
    pub days_tracked: usize,
    pub average_daily: Option<Money>,
    pub period_total: Money,
    pub channel_totals: ChannelAmounts,
    pub transactions: u64,
}

impl LedgerSummary {
    pub fn from_view(view: &[&LedgerEntry]) -> Self {
        let days_tracked = view.len();
        let period_total = round_cents(view.iter().map(|e| e.daily_total).sum());

        let mut channel_totals = ChannelAmounts::default();
        for entry in view {
            channel_totals.accumulate(&entry.amounts);
        }

        Self {
            days_tracked,
            average_daily: mean(period_total, days_tracked),
            period_total,
            channel_totals: channel_totals.rounded(),
            transactions: view.iter().map(|e| u64::from(e.transactions)).sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PayoutSummary {
    pub total_count: usize,
    pub completed_count: usize,
    pub completed_amount: Money,
    pub processing_count: usize,
    pub failed_count: usize,
}

impl PayoutSummary {
    pub fn from_view(view: &[&PayoutConfirmation]) -> Self {
        let count = |status: ConfirmationStatus| view.iter().filter(|p| p.status == status).count();
        let completed_amount = round_cents(
            view.iter()
                .filter(|p| p.status == ConfirmationStatus::Completed)
                .map(|p| p.amount)
                .sum(),
        );

        Self {
            total_count: view.len(),
            completed_count: count(ConfirmationStatus::Completed),
            completed_amount,
            processing_count: count(ConfirmationStatus::Processing),
            failed_count: count(ConfirmationStatus::Failed),
        }
    }
}

/// One point of a time-series chart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Money,
}

/// Data behind the two-panel trend chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendSeries {
    pub daily_totals: Vec<SeriesPoint>,
    pub cumulative_totals: Vec<SeriesPoint>,
}

impl TrendSeries {
    pub fn from_view(view: &[&LedgerEntry]) -> Self {
        let series = |value: fn(&LedgerEntry) -> Money| -> Vec<SeriesPoint> {
            view.iter()
                .map(|e| SeriesPoint { date: e.date, value: value(*e) })
                .collect()
        };
        Self {
            daily_totals: series(|e| e.daily_total),
            cumulative_totals: series(|e| e.cumulative_total),
        }
    }
}

/// One slice of the channel breakdown chart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ChannelShare {
    pub channel: Channel,
    pub total: Money,
    /// Fraction in [0, 1]; `None` when the period total is zero.
    pub share: Option<f64>,
}

pub fn channel_breakdown(totals: &ChannelAmounts) -> Vec<ChannelShare> {
    let grand_total: f64 = Channel::ALL.iter().map(|c| totals.get(*c)).sum();
    Channel::ALL
        .into_iter()
        .map(|channel| {
            let total = totals.get(channel);
            ChannelShare {
                channel,
                total,
                share: (grand_total > 0.0).then(|| total / grand_total),
            }
        })
        .collect()
}
