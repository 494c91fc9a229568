//! Payout Journal: one row per payout event, unordered.

use crate::{
    channel::{normalize_label, Channel},
    client_registry::client_id_for,
    config::CONFIRMATION_ID_SPACE,
    error::{DashError, DashResult},
    rng::DatasetRng,
    types::{round_cents, ClientId, ConfirmationId, Money},
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

const CONFIRMATION_ID_BASE: u64 = 10_000;
const AMOUNT_RANGE: (f64, f64) = (50.0, 2000.0);
const LOOKBACK_DAYS: (i64, i64) = (0, 14);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConfirmationStatus {
    Completed,
    Processing,
    Failed,
}

impl ConfirmationStatus {
    pub const ALL: [ConfirmationStatus; 3] = [Self::Completed, Self::Processing, Self::Failed];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Processing => "Processing",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConfirmationStatus {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(status.label()) == normalize_label(s))
            .ok_or_else(|| DashError::parse("confirmation status", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoutConfirmation {
    pub confirmation_id: ConfirmationId,
    pub amount: Money,
    pub method: Channel,
    pub status: ConfirmationStatus,
    /// Minute precision.
    pub timestamp: NaiveDateTime,
    /// May name a client that is not in the registry.
    pub client_id: ClientId,
}

/// Generate `count` payouts dated within the two weeks before `now`.
///
/// `client_count` bounds the client ids the payouts are attributed to.
pub fn generate_payouts(
    count: usize,
    client_count: usize,
    now: NaiveDateTime,
    rng: &mut DatasetRng,
) -> DashResult<Vec<PayoutConfirmation>> {
    if count == 0 {
        return Err(DashError::invalid_config("payout_count", "must be positive"));
    }
    if count > CONFIRMATION_ID_SPACE {
        return Err(DashError::invalid_config(
            "payout_count",
            format!("cannot exceed {CONFIRMATION_ID_SPACE} unique confirmation ids"),
        ));
    }
    if client_count == 0 {
        return Err(DashError::invalid_config("client_count", "must be positive"));
    }

    let mut seen = HashSet::with_capacity(count);
    let mut payouts = Vec::with_capacity(count);

    for _ in 0..count {
        // Redraw on collision; the id space is far larger than any valid count.
        let confirmation_id = loop {
            let n = CONFIRMATION_ID_BASE + rng.next_u64_below(CONFIRMATION_ID_SPACE as u64);
            if seen.insert(n) {
                break format!("PAY-{n}");
            }
        };

        let amount = round_cents(rng.uniform(AMOUNT_RANGE.0, AMOUNT_RANGE.1));
        let method = *rng.pick(&Channel::ALL);
        let status = *rng.pick(&ConfirmationStatus::ALL);
        let timestamp = now - Duration::days(rng.int_inclusive(LOOKBACK_DAYS.0, LOOKBACK_DAYS.1));
        let client_id = client_id_for(rng.next_u64_below(client_count as u64) as usize);

        payouts.push(PayoutConfirmation {
            confirmation_id,
            amount,
            method,
            status,
            timestamp,
            client_id,
        });
    }

    log::info!("{}: generated {} payout confirmations", rng.name, payouts.len());
    Ok(payouts)
}
