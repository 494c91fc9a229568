//! Client Registry: one row per client account.

use crate::{
    channel::{normalize_label, Channel, ChannelAmounts},
    error::{DashError, DashResult},
    name_generator::NameGenerator,
    rng::DatasetRng,
    types::{round_cents, ClientId, Money},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// First numeric client key; client `i` is `DD-{CLIENT_ID_BASE + i}`.
pub const CLIENT_ID_BASE: usize = 1000;

/// Per channel: (probability the client used it, upper bound of the sent amount).
const CHANNEL_PROFILE: [(Channel, f64, f64); 4] = [
    (Channel::CashApp, 0.7, 1000.0),
    (Channel::Zelle, 0.6, 800.0),
    (Channel::PayPal, 0.8, 1200.0),
    (Channel::BankTransfer, 0.4, 2000.0),
];

const MAX_BALANCE_RANGE: (f64, f64) = (500.0, 5000.0);
const BALANCE_NOISE_RANGE: (f64, f64) = (-200.0, 500.0);
const LAST_ACTIVITY_DAYS: (i64, i64) = (0, 30);
const JOIN_DAYS: (i64, i64) = (30, 365);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PayoutStatus {
    Confirmed,
    Pending,
    Processing,
}

impl PayoutStatus {
    pub const ALL: [PayoutStatus; 3] = [Self::Confirmed, Self::Pending, Self::Processing];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Processing => "Processing",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PayoutStatus {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(status.label()) == normalize_label(s))
            .ok_or_else(|| DashError::parse("payout status", s))
    }
}

/// Verification state as offered by the sidebar selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Verification {
    Verified,
    Unverified,
}

impl Verification {
    pub fn from_flag(verified: bool) -> Self {
        if verified {
            Self::Verified
        } else {
            Self::Unverified
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Unverified => "Unverified",
        }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Verification {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match normalize_label(s).as_str() {
            "verified" | "true" => Ok(Self::Verified),
            "unverified" | "false" => Ok(Self::Unverified),
            _ => Err(DashError::parse("verification status", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub verified: bool,
    pub max_balance: Money,
    /// Never negative; clamped at generation.
    pub current_balance: Money,
    pub sent: ChannelAmounts,
    /// Always `sent.total()`.
    pub total_sent: Money,
    pub payout_status: PayoutStatus,
    pub last_activity: NaiveDate,
    pub join_date: NaiveDate,
}

impl Client {
    pub fn verification(&self) -> Verification {
        Verification::from_flag(self.verified)
    }
}

pub fn client_id_for(index: usize) -> ClientId {
    format!("DD-{:04}", CLIENT_ID_BASE + index)
}

/// Generate `count` clients relative to `today`.
pub fn generate_clients(
    count: usize,
    today: NaiveDate,
    rng: &mut DatasetRng,
) -> DashResult<Vec<Client>> {
    if count == 0 {
        return Err(DashError::invalid_config("client_count", "must be positive"));
    }

    let mut clients = Vec::with_capacity(count);
    for i in 0..count {
        let person = NameGenerator::generate_name(rng);

        let mut sent = ChannelAmounts::default();
        for (channel, probability, upper) in CHANNEL_PROFILE {
            // Decide first, then draw the amount; a skipped channel is exactly zero.
            if rng.chance(probability) {
                *sent.get_mut(channel) = round_cents(rng.uniform(0.0, upper));
            }
        }
        let total_sent = sent.total();

        let max_balance = round_cents(rng.uniform(MAX_BALANCE_RANGE.0, MAX_BALANCE_RANGE.1));
        let noise = rng.uniform(BALANCE_NOISE_RANGE.0, BALANCE_NOISE_RANGE.1);
        let current_balance = round_cents(max_balance - total_sent + noise).max(0.0);

        let verified = rng.chance(0.5);
        let payout_status = *rng.pick(&PayoutStatus::ALL);
        let email = NameGenerator::generate_email(&person, rng);

        let last_activity =
            today - Duration::days(rng.int_inclusive(LAST_ACTIVITY_DAYS.0, LAST_ACTIVITY_DAYS.1));
        let join_date = today - Duration::days(rng.int_inclusive(JOIN_DAYS.0, JOIN_DAYS.1));

        clients.push(Client {
            client_id: client_id_for(i),
            name: person.full_name(),
            email,
            verified,
            max_balance,
            current_balance,
            sent,
            total_sent,
            payout_status,
            last_activity,
            join_date,
        });
    }

    log::info!("{}: generated {} clients", rng.name, clients.len());
    Ok(clients)
}
