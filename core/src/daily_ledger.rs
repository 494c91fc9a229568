//! Daily Ledger: one row per calendar day, oldest first, ending today.

use crate::{
    channel::{Channel, ChannelAmounts},
    config::MAX_DAYS,
    error::{DashError, DashResult},
    rng::DatasetRng,
    types::{round_cents, Money},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daily amount bounds per channel.
const DAILY_RANGES: [(Channel, f64, f64); 4] = [
    (Channel::CashApp, 200.0, 1500.0),
    (Channel::Zelle, 150.0, 1200.0),
    (Channel::PayPal, 300.0, 2000.0),
    (Channel::BankTransfer, 100.0, 800.0),
];

const TRANSACTIONS_PER_DAY: (i64, i64) = (5, 25);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub amounts: ChannelAmounts,
    pub daily_total: Money,
    /// Inclusive running sum of `daily_total` over the whole generated run.
    pub cumulative_total: Money,
    pub transactions: u32,
}

/// Generate `days` consecutive entries, the last one dated `today`.
pub fn generate_ledger(
    days: usize,
    today: NaiveDate,
    rng: &mut DatasetRng,
) -> DashResult<Vec<LedgerEntry>> {
    if days == 0 {
        return Err(DashError::invalid_config("ledger_days", "must be positive"));
    }
    if days > MAX_DAYS {
        return Err(DashError::invalid_config(
            "ledger_days",
            format!("cannot exceed {MAX_DAYS} days"),
        ));
    }

    let mut entries = Vec::with_capacity(days);
    let mut cumulative = 0.0;

    for day in 0..days {
        let date = today - Duration::days((days - day - 1) as i64);

        let mut amounts = ChannelAmounts::default();
        for (channel, low, high) in DAILY_RANGES {
            *amounts.get_mut(channel) = round_cents(rng.uniform(low, high));
        }
        let daily_total = amounts.total();
        cumulative = round_cents(cumulative + daily_total);

        let transactions =
            rng.int_inclusive(TRANSACTIONS_PER_DAY.0, TRANSACTIONS_PER_DAY.1) as u32;

        entries.push(LedgerEntry {
            date,
            amounts,
            daily_total,
            cumulative_total: cumulative,
            transactions,
        });
    }

    log::info!(
        "{}: generated {} ledger days ending {today}",
        rng.name,
        entries.len()
    );
    Ok(entries)
}
